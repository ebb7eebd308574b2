// SPDX-License-Identifier: Apache-2.0

use crate::error::DuckLakeResult;
use crate::quote::{quote_identifier, quote_literal};
use crate::statement::OptionSet;
use crate::value::Value;

/// One `ATTACH` of a catalog or data source under a local alias
#[derive(Debug, Clone, PartialEq)]
pub struct AttachDescriptor {
    pub alias: String,
    pub url: String,
    pub options: OptionSet,
}

impl AttachDescriptor {
    pub fn new(alias: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            url: url.into(),
            options: OptionSet::new(),
        }
    }

    pub fn with_options(mut self, options: OptionSet) -> Self {
        self.options = options;
        self
    }
}

/// Session commands that the engine does not accept placeholders for.
///
/// These are rendered to plain SQL text, with every identifier and value
/// quoted here and nowhere else.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Install { extension: String },
    CreateSecret { options: OptionSet },
    Attach(AttachDescriptor),
    Detach { alias: String },
    Use { alias: String },
    DropTable { table: String, if_exists: bool },
    Checkpoint,
}

impl Command {
    pub fn render(&self) -> DuckLakeResult<String> {
        let sql = match self {
            Command::Install { extension } => format!("INSTALL {}", quote_identifier(extension)),
            Command::CreateSecret { options } => format!("CREATE SECRET ({})", options.render()?),
            Command::Attach(attach) => {
                let mut sql = format!(
                    "ATTACH {} AS {}",
                    quote_literal(&Value::from(attach.url.as_str()))?,
                    quote_identifier(&attach.alias)
                );
                if !attach.options.is_empty() {
                    sql.push_str(&format!(" ({})", attach.options.render()?));
                }
                sql
            }
            Command::Detach { alias } => format!("DETACH {}", quote_identifier(alias)),
            Command::Use { alias } => format!("USE {}", quote_identifier(alias)),
            Command::DropTable { table, if_exists } => format!(
                "DROP TABLE {}{}",
                if *if_exists { "IF EXISTS " } else { "" },
                quote_identifier(table)
            ),
            Command::Checkpoint => "CHECKPOINT".to_string(),
        };
        Ok(sql)
    }

    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Install { .. } => "install",
            Command::CreateSecret { .. } => "create_secret",
            Command::Attach(_) => "attach",
            Command::Detach { .. } => "detach",
            Command::Use { .. } => "use",
            Command::DropTable { .. } => "drop_table",
            Command::Checkpoint => "checkpoint",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install() {
        let cmd = Command::Install {
            extension: "ducklake".to_string(),
        };
        assert_eq!(cmd.render().unwrap(), "INSTALL \"ducklake\"");
    }

    #[test]
    fn test_create_secret() {
        let mut options = OptionSet::new();
        options.insert("type", "s3").insert("provider", "credential_chain");
        let cmd = Command::CreateSecret { options };
        assert_eq!(
            cmd.render().unwrap(),
            "CREATE SECRET (TYPE 's3', PROVIDER 'credential_chain')"
        );
    }

    #[test]
    fn test_attach_with_options() {
        let mut options = OptionSet::new();
        options
            .insert("data_path", "s3://bucket/data/")
            .insert("create_if_not_exists", false);
        let cmd = Command::Attach(
            AttachDescriptor::new("ducklake", "ducklake:postgres:postgres://localhost/db")
                .with_options(options),
        );
        assert_eq!(
            cmd.render().unwrap(),
            "ATTACH 'ducklake:postgres:postgres://localhost/db' AS \"ducklake\" \
             (DATA_PATH 's3://bucket/data/', CREATE_IF_NOT_EXISTS false)"
        );
    }

    #[test]
    fn test_attach_without_options() {
        let cmd = Command::Attach(AttachDescriptor::new("db", "/tmp/x.duckdb"));
        assert_eq!(cmd.render().unwrap(), "ATTACH '/tmp/x.duckdb' AS \"db\"");
    }

    #[test]
    fn test_hostile_names_stay_quoted() {
        let cmd = Command::Attach(AttachDescriptor::new(
            "a\" (READ_ONLY false) --",
            "x' AS y; DROP TABLE t; --",
        ));
        assert_eq!(
            cmd.render().unwrap(),
            "ATTACH 'x'' AS y; DROP TABLE t; --' AS \"a\"\" (READ_ONLY false) --\""
        );
    }

    #[test]
    fn test_drop_table() {
        let cmd = Command::DropTable {
            table: "events".to_string(),
            if_exists: true,
        };
        assert_eq!(cmd.render().unwrap(), "DROP TABLE IF EXISTS \"events\"");
        let cmd = Command::DropTable {
            table: "events".to_string(),
            if_exists: false,
        };
        assert_eq!(cmd.render().unwrap(), "DROP TABLE \"events\"");
    }

    #[test]
    fn test_detach_use_checkpoint() {
        let alias = "memory".to_string();
        assert_eq!(
            Command::Detach { alias: alias.clone() }.render().unwrap(),
            "DETACH \"memory\""
        );
        assert_eq!(Command::Use { alias }.render().unwrap(), "USE \"memory\"");
        assert_eq!(Command::Checkpoint.render().unwrap(), "CHECKPOINT");
    }
}
