#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("sign in to add items to your cart")]
    AuthRequired,
    #[error("invalid cart item: {0}")]
    InvalidItem(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("status feed error: {0}")]
    Feed(String),
}
