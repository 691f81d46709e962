//! Cloud side of aiphelper.
//!
//! Authenticates against AWS IAM Identity Center or Azure, discovers the
//! accounts and subscriptions the identity can reach, and renders the
//! marker blocks that describe them for the AWS CLI and Steampipe.

pub mod account;
pub mod aws;
pub mod azure;
pub mod error;
pub mod http;
pub mod render;
pub mod runtime;
pub mod text;

pub use account::{AccountSource, CloudAccount, filter_accounts};
pub use error::{Error, Result};
pub use render::Renderer;
