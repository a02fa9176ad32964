//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use easyredir::{
    CertificateStatus, DnsRecordType, DnsStatus, DnsValues, Host, HostDetail, Page, ResponseType,
    Rule,
};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::context::{CliError, CliResult};

pub(crate) fn render_rules(rules: &[Rule], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(rules)?,
        OutputFormat::Table => {
            print_rule_rows(rules);
            println!("total: {}", rules.len());
        }
    }
    Ok(())
}

pub(crate) fn render_rules_page(page: &Page<Rule>, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(page)?,
        OutputFormat::Table => {
            print_rule_rows(&page.data);
            if let Some(cursor) = page.next_cursor() {
                println!("next cursor: {cursor}");
            }
        }
    }
    Ok(())
}

fn print_rule_rows(rules: &[Rule]) {
    println!("{:<24} {:<44} TARGET URL", "ID", "SOURCE URLS");
    for rule in rules {
        let sources = rule
            .attributes
            .source_urls
            .as_deref()
            .unwrap_or_default()
            .join(", ");
        let target = rule.attributes.target_url.as_deref().unwrap_or("<unset>");
        println!("{:<24} {:<44} {}", rule.id, sources, target);
    }
}

pub(crate) fn render_rule(rule: &Rule, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(rule)?,
        OutputFormat::Table => {
            println!("id: {}", rule.id);
            if let Some(sources) = &rule.attributes.source_urls {
                println!("source urls: {}", sources.join(", "));
            }
            if let Some(target) = &rule.attributes.target_url {
                println!("target url: {target}");
            }
            if let Some(response_type) = rule.attributes.response_type {
                println!("response type: {}", response_type_to_str(response_type));
            }
            if let Some(value) = rule.attributes.forward_params {
                println!("forward params: {value}");
            }
            if let Some(value) = rule.attributes.forward_path {
                println!("forward path: {value}");
            }
        }
    }
    Ok(())
}

pub(crate) fn render_hosts(hosts: &[Host], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(hosts)?,
        OutputFormat::Table => {
            print_host_rows(hosts);
            println!("total: {}", hosts.len());
        }
    }
    Ok(())
}

pub(crate) fn render_hosts_page(page: &Page<Host>, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(page)?,
        OutputFormat::Table => {
            print_host_rows(&page.data);
            if let Some(cursor) = page.next_cursor() {
                println!("next cursor: {cursor}");
            }
        }
    }
    Ok(())
}

fn print_host_rows(hosts: &[Host]) {
    println!("{:<24} {:<32} {:<8} CERTIFICATE", "ID", "NAME", "DNS");
    for host in hosts {
        println!(
            "{:<24} {:<32} {:<8} {}",
            host.id,
            host.attributes.name,
            dns_status_to_str(host.attributes.dns_status),
            certificate_status_to_str(host.attributes.certificate_status)
        );
    }
}

pub(crate) fn render_host_detail(detail: &HostDetail, format: OutputFormat) -> CliResult<()> {
    if matches!(format, OutputFormat::Json) {
        return print_json(detail);
    }

    let attributes = &detail.attributes;
    println!("id: {}", detail.id);
    if let Some(name) = &attributes.name {
        println!("name: {name}");
    }
    if let Some(status) = attributes.dns_status {
        println!("dns status: {}", dns_status_to_str(status));
    }
    if let Some(tested_at) = attributes.dns_tested_at {
        println!("dns tested at: {tested_at}");
    }
    if let Some(status) = attributes.certificate_status {
        println!("certificate status: {}", certificate_status_to_str(status));
    }
    if let Some(value) = attributes.acme_enabled {
        println!("acme enabled: {value}");
    }
    if let Some(value) = attributes.match_options.case_insensitive {
        println!("case insensitive: {value}");
    }
    if let Some(value) = attributes.match_options.slash_insensitive {
        println!("slash insensitive: {value}");
    }
    let not_found = &attributes.not_found_action;
    if let Some(value) = not_found.forward_params {
        println!("404 forward params: {value}");
    }
    if let Some(value) = not_found.forward_path {
        println!("404 forward path: {value}");
    }
    if let Some(code) = not_found.response_code {
        println!("404 response code: {}", u16::from(code));
    }
    if let Some(url) = &not_found.response_url {
        println!("404 response url: {url}");
    }
    let security = &attributes.security;
    if let Some(value) = security.https_upgrade {
        println!("https upgrade: {value}");
    }
    if let Some(value) = security.prevent_foreign_embedding {
        println!("prevent foreign embedding: {value}");
    }
    if let Some(value) = security.hsts_include_sub_domains {
        println!("hsts include sub domains: {value}");
    }
    if let Some(value) = security.hsts_max_age {
        println!("hsts max age: {value}");
    }
    if let Some(value) = security.hsts_preload {
        println!("hsts preload: {value}");
    }
    if let Some(entries) = &attributes.required_dns_entries {
        println!("required dns: {}", dns_values_line(&entries.recommended));
        for alternative in &entries.alternatives {
            println!("alternative dns: {}", dns_values_line(alternative));
        }
    }
    for detected in &attributes.detected_dns_entries {
        println!("detected dns: {}", dns_values_line(detected));
    }
    Ok(())
}

fn dns_values_line(values: &DnsValues) -> String {
    let kind = values.kind.map_or("?", record_type_to_str);
    format!("{kind} {}", values.values.join(", "))
}

#[must_use]
const fn record_type_to_str(kind: DnsRecordType) -> &'static str {
    match kind {
        DnsRecordType::A => "A",
        DnsRecordType::Cname => "CNAME",
    }
}

#[must_use]
const fn response_type_to_str(response_type: ResponseType) -> &'static str {
    match response_type {
        ResponseType::MovedPermanently => "moved_permanently",
        ResponseType::Found => "found",
    }
}

#[must_use]
const fn dns_status_to_str(status: DnsStatus) -> &'static str {
    match status {
        DnsStatus::Active => "active",
        DnsStatus::Invalid => "invalid",
    }
}

#[must_use]
const fn certificate_status_to_str(status: CertificateStatus) -> &'static str {
    match status {
        CertificateStatus::Active => "active",
        CertificateStatus::Processing => "processing",
        CertificateStatus::InvalidDns => "invalid_dns",
        CertificateStatus::AutoSslNotSupported => "auto_ssl_not_supported",
        CertificateStatus::HostnameContainsUnderscore => "hostname_contains_underscore",
        CertificateStatus::InvalidCaaRecord => "invalid_caa_record",
        CertificateStatus::AaaaRecordPresent => "aaaa_record_present",
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}
