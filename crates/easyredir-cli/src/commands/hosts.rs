//! Handlers for the host subcommands.

use easyredir::{
    HostUpdateAttributes, ListOptions, MatchOptions, NotFoundAction, ResponseCode, Security,
};

use crate::cli::{GetHostArgs, ListHostsArgs, OutputFormat, UpdateHostArgs};
use crate::context::{AppContext, CliError, CliResult, classify_error};
use crate::output::{render_host_detail, render_hosts, render_hosts_page};

pub(crate) async fn handle_hosts_list(
    ctx: &AppContext,
    args: ListHostsArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let mut options = ListOptions::new();
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
        let hosts = ctx
            .client
            .list_all_hosts(&options)
            .await
            .map_err(|err| classify_error("unable to list hosts", err))?;
        render_hosts(&hosts, output)
    } else {
        let page = ctx
            .client
            .list_hosts(&options)
            .await
            .map_err(|err| classify_error("unable to list hosts", err))?;
        render_hosts_page(&page, output)
    }
}

pub(crate) async fn handle_host_get(
    ctx: &AppContext,
    args: GetHostArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let host = ctx
        .client
        .get_host(&args.id)
        .await
        .map_err(|err| classify_error("unable to get host", err))?;
    render_host_detail(&host, output)
}

pub(crate) async fn handle_host_update(
    ctx: &AppContext,
    args: UpdateHostArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let (id, attributes) = update_attributes(args)?;

    let host = ctx
        .client
        .update_host(&id, &attributes)
        .await
        .map_err(|err| classify_error("unable to update host", err))?;
    render_host_detail(&host, output)
}

/// Assemble the partial-update payload; a section is only included when at
/// least one of its flags was given.
fn update_attributes(args: UpdateHostArgs) -> CliResult<(String, HostUpdateAttributes)> {
    let match_options = if args.case_insensitive.is_some() || args.slash_insensitive.is_some() {
        Some(MatchOptions {
            case_insensitive: args.case_insensitive,
            slash_insensitive: args.slash_insensitive,
        })
    } else {
        None
    };

    let not_found_action = if args.forward_params.is_some()
        || args.forward_path.is_some()
        || args.custom_404_body.is_some()
        || args.response_code.is_some()
        || args.response_url.is_some()
    {
        let response_code = args
            .response_code
            .map(ResponseCode::try_from)
            .transpose()
            .map_err(CliError::validation)?;
        Some(NotFoundAction {
            forward_params: args.forward_params,
            forward_path: args.forward_path,
            custom_404_body: args.custom_404_body,
            custom_404_body_present: None,
            response_code,
            response_url: args.response_url,
        })
    } else {
        None
    };

    let security = if args.https_upgrade.is_some()
        || args.prevent_foreign_embedding.is_some()
        || args.hsts_include_sub_domains.is_some()
        || args.hsts_max_age.is_some()
        || args.hsts_preload.is_some()
    {
        Some(Security {
            https_upgrade: args.https_upgrade,
            prevent_foreign_embedding: args.prevent_foreign_embedding,
            hsts_include_sub_domains: args.hsts_include_sub_domains,
            hsts_max_age: args.hsts_max_age,
            hsts_preload: args.hsts_preload,
        })
    } else {
        None
    };

    let attributes = HostUpdateAttributes {
        match_options,
        not_found_action,
        security,
    };
    if attributes == HostUpdateAttributes::default() {
        return Err(CliError::validation("no attributes provided to update"));
    }

    Ok((args.id, attributes))
}
