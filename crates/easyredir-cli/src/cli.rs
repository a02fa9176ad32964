//! Argument parsing and command dispatch.

use clap::{Args, Parser, Subcommand, ValueEnum};
use easyredir::ResponseType;
use tracing_subscriber::EnvFilter;

use crate::commands::{hosts, rules};
use crate::context::{AppContext, CliResult};

/// Parses CLI arguments, executes the requested command, and returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    init_tracing();

    match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let ctx = AppContext::from_cli(&cli)?;
    let output = cli.output;

    match cli.command {
        Command::Create(CreateCommand::Rule(args)) => {
            rules::handle_rule_create(&ctx, args, output).await
        }
        Command::Get(get) => match get {
            GetCommand::Rule(args) => rules::handle_rule_get(&ctx, args, output).await,
            GetCommand::Host(args) => hosts::handle_host_get(&ctx, args, output).await,
        },
        Command::List(list) => match list {
            ListCommand::Rules(args) => rules::handle_rules_list(&ctx, args, output).await,
            ListCommand::Hosts(args) => hosts::handle_hosts_list(&ctx, args, output).await,
        },
        Command::Remove(RemoveCommand::Rule(args)) => rules::handle_rule_remove(&ctx, args).await,
        Command::Update(update) => match update {
            UpdateCommand::Rule(args) => rules::handle_rule_update(&ctx, args, output).await,
            UpdateCommand::Host(args) => hosts::handle_host_update(&ctx, args, output).await,
        },
    }
}

#[derive(Parser)]
#[command(name = "easyredir", about = "CLI for the Easyredir redirect-management API")]
pub(crate) struct Cli {
    #[arg(long, global = true, env = "EASYREDIR_API_KEY")]
    pub(crate) api_key: Option<String>,
    #[arg(long, global = true, env = "EASYREDIR_API_SECRET", hide_env_values = true)]
    pub(crate) api_secret: Option<String>,
    #[arg(
        long,
        global = true,
        env = "EASYREDIR_API_URL",
        default_value = easyredir::DEFAULT_BASE_URL
    )]
    pub(crate) api_url: String,
    #[arg(
        long,
        global = true,
        env = "EASYREDIR_HTTP_TIMEOUT_SECS",
        help = "Request timeout in seconds; the HTTP client default applies when unset"
    )]
    pub(crate) timeout: Option<u64>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    #[command(subcommand)]
    Create(CreateCommand),
    #[command(subcommand)]
    Get(GetCommand),
    #[command(subcommand)]
    List(ListCommand),
    #[command(subcommand)]
    Remove(RemoveCommand),
    #[command(subcommand)]
    Update(UpdateCommand),
}

#[derive(Subcommand)]
pub(crate) enum CreateCommand {
    Rule(CreateRuleArgs),
}

#[derive(Subcommand)]
pub(crate) enum GetCommand {
    Rule(GetRuleArgs),
    Host(GetHostArgs),
}

#[derive(Subcommand)]
pub(crate) enum ListCommand {
    Rules(ListRulesArgs),
    Hosts(ListHostsArgs),
}

#[derive(Subcommand)]
pub(crate) enum RemoveCommand {
    Rule(RemoveRuleArgs),
}

#[derive(Subcommand)]
pub(crate) enum UpdateCommand {
    Rule(UpdateRuleArgs),
    Host(UpdateHostArgs),
}

#[derive(Args)]
pub(crate) struct CreateRuleArgs {
    #[arg(
        long = "source-url",
        required = true,
        help = "URL the rule matches; repeat for multiple sources"
    )]
    pub(crate) source_urls: Vec<String>,
    #[arg(long, help = "URL visitors are redirected to")]
    pub(crate) target_url: String,
    #[arg(long, help = "Carry the query string over to the target (true/false)")]
    pub(crate) forward_params: Option<bool>,
    #[arg(long, help = "Carry the request path over to the target (true/false)")]
    pub(crate) forward_path: Option<bool>,
    #[arg(long, value_enum)]
    pub(crate) response_type: Option<ResponseTypeArg>,
}

#[derive(Args)]
pub(crate) struct GetRuleArgs {
    #[arg(help = "Rule identifier")]
    pub(crate) id: String,
}

#[derive(Args)]
pub(crate) struct GetHostArgs {
    #[arg(help = "Host identifier")]
    pub(crate) id: String,
}

#[derive(Args, Default)]
pub(crate) struct ListRulesArgs {
    #[arg(long, help = "Only rules whose source URLs contain this text")]
    pub(crate) source_filter: Option<String>,
    #[arg(long, help = "Only rules whose target URL contains this text")]
    pub(crate) target_filter: Option<String>,
    #[arg(long)]
    pub(crate) limit: Option<u32>,
    #[arg(long, help = "Return records after this id")]
    pub(crate) starting_after: Option<String>,
    #[arg(long, help = "Return records before this id")]
    pub(crate) ending_before: Option<String>,
    #[arg(long, help = "Follow pagination and return every page")]
    pub(crate) all: bool,
}

#[derive(Args, Default)]
pub(crate) struct ListHostsArgs {
    #[arg(long)]
    pub(crate) limit: Option<u32>,
    #[arg(long, help = "Return records after this id")]
    pub(crate) starting_after: Option<String>,
    #[arg(long, help = "Return records before this id")]
    pub(crate) ending_before: Option<String>,
    #[arg(long, help = "Follow pagination and return every page")]
    pub(crate) all: bool,
}

#[derive(Args)]
pub(crate) struct RemoveRuleArgs {
    #[arg(help = "Rule identifier")]
    pub(crate) id: String,
}

#[derive(Args)]
pub(crate) struct UpdateRuleArgs {
    #[arg(help = "Rule identifier")]
    pub(crate) id: String,
    #[arg(long = "source-url", help = "Replace the matched URLs; repeatable")]
    pub(crate) source_urls: Vec<String>,
    #[arg(long)]
    pub(crate) target_url: Option<String>,
    #[arg(long)]
    pub(crate) forward_params: Option<bool>,
    #[arg(long)]
    pub(crate) forward_path: Option<bool>,
    #[arg(long, value_enum)]
    pub(crate) response_type: Option<ResponseTypeArg>,
}

#[derive(Args)]
pub(crate) struct UpdateHostArgs {
    #[arg(help = "Host identifier")]
    pub(crate) id: String,
    #[arg(long)]
    pub(crate) case_insensitive: Option<bool>,
    #[arg(long)]
    pub(crate) slash_insensitive: Option<bool>,
    #[arg(long)]
    pub(crate) forward_params: Option<bool>,
    #[arg(long)]
    pub(crate) forward_path: Option<bool>,
    #[arg(long)]
    pub(crate) custom_404_body: Option<String>,
    #[arg(long, help = "Status code served when no rule matches (301, 302 or 401)")]
    pub(crate) response_code: Option<u16>,
    #[arg(long)]
    pub(crate) response_url: Option<String>,
    #[arg(long)]
    pub(crate) https_upgrade: Option<bool>,
    #[arg(long)]
    pub(crate) prevent_foreign_embedding: Option<bool>,
    #[arg(long)]
    pub(crate) hsts_include_sub_domains: Option<bool>,
    #[arg(long)]
    pub(crate) hsts_max_age: Option<u32>,
    #[arg(long)]
    pub(crate) hsts_preload: Option<bool>,
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum ResponseTypeArg {
    MovedPermanently,
    Found,
}

impl From<ResponseTypeArg> for ResponseType {
    fn from(value: ResponseTypeArg) -> Self {
        match value {
            ResponseTypeArg::MovedPermanently => Self::MovedPermanently,
            ResponseTypeArg::Found => Self::Found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["easyredir", "--api-key", "key", "--api-secret", "secret"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("arguments parse")
    }

    #[test]
    fn list_rules_flags_map_to_arguments() {
        let cli = parse(&[
            "list",
            "rules",
            "--source-filter",
            "abc.com",
            "--limit",
            "5",
            "--all",
        ]);
        match cli.command {
            Command::List(ListCommand::Rules(args)) => {
                assert_eq!(args.source_filter.as_deref(), Some("abc.com"));
                assert!(args.target_filter.is_none());
                assert_eq!(args.limit, Some(5));
                assert!(args.all);
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn create_rule_requires_a_source_url() {
        let argv = [
            "easyredir",
            "--api-key",
            "key",
            "--api-secret",
            "secret",
            "create",
            "rule",
            "--target-url",
            "target.example.com",
        ];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn update_rule_bool_flags_are_tri_state() {
        let cli = parse(&["update", "rule", "abc-def", "--forward-params", "false"]);
        match cli.command {
            Command::Update(UpdateCommand::Rule(args)) => {
                assert_eq!(args.id, "abc-def");
                assert_eq!(args.forward_params, Some(false));
                assert!(args.forward_path.is_none());
                assert!(args.source_urls.is_empty());
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn response_type_values_are_kebab_case() {
        let cli = parse(&[
            "create",
            "rule",
            "--source-url",
            "source.example.com",
            "--target-url",
            "target.example.com",
            "--response-type",
            "moved-permanently",
        ]);
        match cli.command {
            Command::Create(CreateCommand::Rule(args)) => {
                assert!(matches!(
                    args.response_type,
                    Some(ResponseTypeArg::MovedPermanently)
                ));
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn output_defaults_to_table() {
        let cli = parse(&["list", "hosts"]);
        assert!(matches!(cli.output, OutputFormat::Table));
    }
}
