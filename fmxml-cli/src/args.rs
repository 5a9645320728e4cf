//! Command-line arguments.

use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use fmxml_lib::error::ConfigError;
use fmxml_lib::query::{
    Action, FieldCriterion, FieldGroup, FieldOp, LogicalOp, Query, SortField,
};
use fmxml_lib::{ConnectorConfig, ENV_HOST, ENV_PASS, ENV_USER};

#[derive(Parser, Debug)]
#[command(
    name = "fmxml",
    version,
    about = "Query a FileMaker server over its XML publishing interface",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the query string for a query without sending it
    Compile(QueryArgs),
    /// Check connectivity and credentials
    Ping,
    /// List the databases hosted by the server
    Databases,
    /// Run a query and print the records as JSON
    Query(QueryArgs),
}

#[derive(Args, Debug)]
pub struct ConnectionArgs {
    #[arg(long, global = true, env = "FM_HOST", help = "Server host name or address")]
    pub host: Option<String>,

    #[arg(long, global = true, env = "FM_PORT", help = "Server port")]
    pub port: Option<u16>,

    #[arg(long, global = true, env = "FM_USER", help = "Account name")]
    pub user: Option<String>,

    #[arg(
        long,
        global = true,
        env = "FM_PASS",
        hide_env_values = true,
        help = "Account password"
    )]
    pub password: Option<String>,

    #[arg(long, global = true, env = "FM_SCHEME", help = "URL scheme [default: http]")]
    pub scheme: Option<String>,

    #[arg(
        long,
        global = true,
        env = "FM_TIMEOUT_SECS",
        value_name = "SECS",
        help = "Request timeout in seconds"
    )]
    pub timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    /// Builds the connector config, failing on the first missing required value.
    pub fn to_config(&self) -> Result<ConnectorConfig, ConfigError> {
        let host = self.host.clone().ok_or(ConfigError::MissingVar(ENV_HOST))?;
        let user = self.user.clone().ok_or(ConfigError::MissingVar(ENV_USER))?;
        let password = self
            .password
            .clone()
            .ok_or(ConfigError::MissingVar(ENV_PASS))?;

        let mut config = ConnectorConfig::new(host, user, password);
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(scheme) = &self.scheme {
            config = config.with_scheme(scheme.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum GroupArg {
    And,
    Or,
    Not,
}

impl From<GroupArg> for LogicalOp {
    fn from(value: GroupArg) -> Self {
        match value {
            GroupArg::And => LogicalOp::And,
            GroupArg::Or => LogicalOp::Or,
            GroupArg::Not => LogicalOp::Not,
        }
    }
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    #[arg(long, help = "Database name")]
    pub db: String,

    #[arg(long, help = "Layout name")]
    pub layout: String,

    #[arg(
        long,
        default_value = "findall",
        help = "find, findall, findany, new, edit, delete or dup"
    )]
    pub action: String,

    #[arg(
        long = "field",
        value_name = "NAME=VALUE",
        value_parser = parse_field,
        help = "Field criterion or assignment (repeatable)"
    )]
    pub fields: Vec<(String, String)>,

    #[arg(
        long,
        default_value = "eq",
        help = "Operator for every --field: eq, cn, bw, ew, gt, gte, lt, lte"
    )]
    pub op: String,

    #[arg(long, value_enum, default_value_t = GroupArg::And, help = "How --field criteria combine")]
    pub group: GroupArg,

    #[arg(
        long = "sort",
        value_name = "NAME[:desc]",
        value_parser = parse_sort,
        help = "Sort field, ascending unless suffixed :desc or :custom (repeatable)"
    )]
    pub sort: Vec<SortField>,

    #[arg(long, help = "Record ID for edit, delete, dup and single-record find")]
    pub record_id: Option<u64>,

    #[arg(long, help = "Maximum number of records [default: all]")]
    pub max: Option<u32>,

    #[arg(long, default_value_t = 0, help = "Number of records to skip")]
    pub skip: u32,

    #[arg(long = "script", help = "Script to run after the request (repeatable)")]
    pub scripts: Vec<String>,

    #[arg(long = "script-param", help = "Script parameter (repeatable)")]
    pub script_params: Vec<String>,

    #[arg(long, help = "Layout used to render the response")]
    pub response_layout: Option<String>,
}

impl QueryArgs {
    pub fn to_query(&self) -> Query {
        let op = FieldOp::parse(&self.op);
        let criteria: Vec<FieldCriterion> = self
            .fields
            .iter()
            .map(|(name, value)| FieldCriterion::new(name.clone(), value.clone(), op))
            .collect();

        let mut builder = Query::builder(self.db.clone(), self.layout.clone(), Action::parse(&self.action))
            .sort_fields(self.sort.clone())
            .skip(self.skip)
            .script_params(self.script_params.iter().cloned());

        if !criteria.is_empty() {
            builder = builder.field_group(FieldGroup::new(self.group.into(), criteria));
        }
        if let Some(id) = self.record_id {
            builder = builder.record_id(id);
        }
        if let Some(max) = self.max {
            builder = builder.max(max);
        }
        for script in &self.scripts {
            builder = builder.post_find_script(script.clone());
        }
        if let Some(layout) = &self.response_layout {
            builder = builder.response_layout(layout.clone());
        }

        builder.build()
    }
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{s}'")),
    }
}

fn parse_sort(s: &str) -> Result<SortField, String> {
    match s.rsplit_once(':') {
        Some((name, "desc")) => Ok(SortField::desc(name)),
        Some((name, "asc")) => Ok(SortField::asc(name)),
        Some((name, "custom")) => Ok(SortField::custom(name)),
        _ if s.is_empty() => Err("empty sort field".to_string()),
        _ => Ok(SortField::asc(s)),
    }
}
