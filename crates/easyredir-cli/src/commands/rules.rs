//! Handlers for the rule subcommands.

use easyredir::{ListOptions, RuleAttributes};

use crate::cli::{
    CreateRuleArgs, GetRuleArgs, ListRulesArgs, OutputFormat, RemoveRuleArgs, UpdateRuleArgs,
};
use crate::context::{AppContext, CliError, CliResult, classify_error};
use crate::output::{render_rule, render_rules, render_rules_page};

pub(crate) async fn handle_rules_list(
    ctx: &AppContext,
    args: ListRulesArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let mut options = ListOptions::new();
    if let Some(filter) = args.source_filter {
        options = options.with_source_filter(filter);
    }
    if let Some(filter) = args.target_filter {
        options = options.with_target_filter(filter);
    }
    if let Some(limit) = args.limit {
        options = options.with_limit(limit);
    }
    if let Some(cursor) = args.starting_after {
        options = options.with_starting_after(cursor);
    }
    if let Some(cursor) = args.ending_before {
        options = options.with_ending_before(cursor);
    }

    if args.all {
        let rules = ctx
            .client
            .list_all_rules(&options)
            .await
            .map_err(|err| classify_error("unable to list rules", err))?;
        render_rules(&rules, output)
    } else {
        let page = ctx
            .client
            .list_rules(&options)
            .await
            .map_err(|err| classify_error("unable to list rules", err))?;
        render_rules_page(&page, output)
    }
}

pub(crate) async fn handle_rule_get(
    ctx: &AppContext,
    args: GetRuleArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let rule = ctx
        .client
        .get_rule(&args.id)
        .await
        .map_err(|err| classify_error("unable to get rule", err))?;
    render_rule(&rule, output)
}

pub(crate) async fn handle_rule_create(
    ctx: &AppContext,
    args: CreateRuleArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let attributes = RuleAttributes {
        forward_params: args.forward_params,
        forward_path: args.forward_path,
        response_type: args.response_type.map(Into::into),
        source_urls: Some(args.source_urls),
        target_url: Some(args.target_url),
    };

    let rule = ctx
        .client
        .create_rule(&attributes)
        .await
        .map_err(|err| classify_error("unable to create rule", err))?;
    render_rule(&rule, output)
}

pub(crate) async fn handle_rule_update(
    ctx: &AppContext,
    args: UpdateRuleArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let source_urls = if args.source_urls.is_empty() {
        None
    } else {
        Some(args.source_urls)
    };
    let attributes = RuleAttributes {
        forward_params: args.forward_params,
        forward_path: args.forward_path,
        response_type: args.response_type.map(Into::into),
        source_urls,
        target_url: args.target_url,
    };

    if attributes == RuleAttributes::default() {
        return Err(CliError::validation("no attributes provided to update"));
    }

    let rule = ctx
        .client
        .update_rule(&args.id, &attributes)
        .await
        .map_err(|err| classify_error("unable to update rule", err))?;
    render_rule(&rule, output)
}

pub(crate) async fn handle_rule_remove(ctx: &AppContext, args: RemoveRuleArgs) -> CliResult<()> {
    ctx.client
        .remove_rule(&args.id)
        .await
        .map_err(|err| classify_error("unable to remove rule", err))?;
    println!("Rule removed (id: {})", args.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use easyredir::{Client, Config};
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn context_for(server: &MockServer) -> AppContext {
        let config =
            Config::new("key", "secret").with_base_url(format!("{}/v1", server.base_url()));
        AppContext {
            client: Client::new(config).expect("client builds"),
        }
    }

    #[tokio::test]
    async fn list_maps_flags_to_query_parameters() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/rules")
                .query_param("sq", "abc.com")
                .query_param("limit", "5");
            then.status(200).json_body(json!({
                "data": [],
                "meta": { "has_more": false },
                "links": {}
            }));
        });

        let args = ListRulesArgs {
            source_filter: Some("abc.com".to_string()),
            limit: Some(5),
            ..ListRulesArgs::default()
        };
        handle_rules_list(&context_for(&server), args, OutputFormat::Table)
            .await
            .expect("list succeeds");

        mock.assert();
    }

    #[tokio::test]
    async fn remove_reports_operation_context_on_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(DELETE).path("/v1/rules/abc-def");
            then.status(500).body("oops");
        });

        let args = RemoveRuleArgs {
            id: "abc-def".to_string(),
        };
        let err = handle_rule_remove(&context_for(&server), args)
            .await
            .expect_err("remove fails");

        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            err.display_message(),
            "unable to remove rule: received status code: 500"
        );
    }
}
