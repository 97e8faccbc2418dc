pub mod commands;
pub mod feed;

use atelier_core::Role;
use clap::ValueEnum;

#[derive(ValueEnum, Clone, Debug, Copy)]
pub enum CliRole {
    Customer,
    Tailor,
    Admin,
}

impl From<CliRole> for Role {
    fn from(r: CliRole) -> Self {
        match r {
            CliRole::Customer => Role::Customer,
            CliRole::Tailor => Role::Tailor,
            CliRole::Admin => Role::Admin,
        }
    }
}
