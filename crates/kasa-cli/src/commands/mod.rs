//! Subcommand implementations.

/// Run a generic command body with its type parameter bound to the
/// selected resource.
macro_rules! with_resource {
    ($kind:expr, $run:ident($($arg:expr),* $(,)?).await) => {
        match $kind {
            $crate::cli::ResourceKind::Checks => $run::<kasa_core::Checks>($($arg),*).await,
            $crate::cli::ResourceKind::Contacts => $run::<kasa_core::Contacts>($($arg),*).await,
            $crate::cli::ResourceKind::Vehicles => $run::<kasa_core::Vehicles>($($arg),*).await,
            $crate::cli::ResourceKind::StockMovements => {
                $run::<kasa_core::StockMovements>($($arg),*).await
            }
        }
    };
    ($kind:expr, $run:ident($($arg:expr),* $(,)?)) => {
        match $kind {
            $crate::cli::ResourceKind::Checks => $run::<kasa_core::Checks>($($arg),*),
            $crate::cli::ResourceKind::Contacts => $run::<kasa_core::Contacts>($($arg),*),
            $crate::cli::ResourceKind::Vehicles => $run::<kasa_core::Vehicles>($($arg),*),
            $crate::cli::ResourceKind::StockMovements => {
                $run::<kasa_core::StockMovements>($($arg),*)
            }
        }
    };
}

pub mod config;
pub mod delete;
pub mod list;
pub mod search;
pub mod show;
pub mod submit;
pub mod validate;

use std::fs;
use std::io::Read;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Read a JSON document from a path, or from stdin for `-`.
pub(crate) fn read_json<T: DeserializeOwned>(source: &str) -> Result<T> {
    let text = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))?
    };
    serde_json::from_str(&text).context("Invalid draft JSON")
}
