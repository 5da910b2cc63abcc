//
// Copyright (c) The frrconf Contributors
//
// SPDX-License-Identifier: MIT
//

use std::fmt::Write;

use frrconf_utils::error::RenderError;
use frrconf_utils::render::Renderer;
use frrconf_utils::tree::ConfigTree;

use crate::debug::Debug;
use crate::error::Error;

// Name of the template producing the IS-IS configuration block.
pub const TEMPLATE_NAME: &str = "frr/isis.frr";

// Configuration block in the daemon's native syntax.
//
// An empty block means the protocol was removed and nothing must be
// installed in place of the previous configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RenderedConfig(String);

// Built-in renderer for the FRR templates used by this crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrrTemplates;

// ===== impl RenderedConfig =====

impl RenderedConfig {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_removal(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for RenderedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RenderedConfig {
    fn from(config: String) -> RenderedConfig {
        RenderedConfig(config)
    }
}

// ===== impl FrrTemplates =====

impl Renderer for FrrTemplates {
    fn render(
        &self,
        template: &str,
        tree: &ConfigTree,
    ) -> Result<String, RenderError> {
        match template {
            TEMPLATE_NAME => render_isis(tree),
            _ => Err(RenderError::TemplateNotFound(template.to_owned())),
        }
    }
}

// ===== global functions =====

// Generates the IS-IS configuration block for an already validated tree.
pub fn generate(
    tree: &ConfigTree,
    renderer: &dyn Renderer,
) -> Result<RenderedConfig, Error> {
    if tree.is_empty() {
        Debug::ConfigRemoval.log();
        return Ok(RenderedConfig::default());
    }

    let config = renderer.render(TEMPLATE_NAME, tree)?;
    Debug::ConfigGenerated(TEMPLATE_NAME, config.lines().count()).log();
    Ok(RenderedConfig(config))
}

// ===== helper functions =====

fn render_isis(tree: &ConfigTree) -> Result<String, RenderError> {
    let domain = tree.get_str("domain").ok_or_else(|| {
        RenderError::MissingField(TEMPLATE_NAME.to_owned(), "domain".to_owned())
    })?;

    let mut output = String::new();
    for (name, iface) in tree.entries("interface") {
        render_interface(&mut output, &domain, &name, &iface)?;
    }
    render_router(&mut output, &domain, tree)?;

    Ok(output)
}

fn render_interface(
    output: &mut String,
    domain: &str,
    name: &str,
    iface: &ConfigTree,
) -> std::fmt::Result {
    writeln!(output, "interface {name}")?;
    writeln!(output, " ip router isis {domain}")?;
    writeln!(output, " ipv6 router isis {domain}")?;
    if iface.exists("bfd") {
        writeln!(output, " isis bfd")?;
    }
    if iface.exists("network.point_to_point") {
        writeln!(output, " isis network point-to-point")?;
    }
    if let Some(circuit_type) = iface.get_str("circuit_type") {
        writeln!(output, " isis circuit-type {}", is_type(&circuit_type))?;
    }
    if let Some(interval) = iface.get_str("hello_interval") {
        writeln!(output, " isis hello-interval {interval}")?;
    }
    if let Some(multiplier) = iface.get_str("hello_multiplier") {
        writeln!(output, " isis hello-multiplier {multiplier}")?;
    }
    if iface.exists("hello_padding") {
        writeln!(output, " isis hello padding")?;
    }
    if let Some(metric) = iface.get_str("metric") {
        writeln!(output, " isis metric {metric}")?;
    }
    if iface.exists("passive") {
        writeln!(output, " isis passive")?;
    }
    if let Some(password) = iface.get_str("password.plaintext_password") {
        writeln!(output, " isis password clear {password}")?;
    } else if let Some(password) = iface.get_str("password.md5") {
        writeln!(output, " isis password md5 {password}")?;
    }
    if let Some(priority) = iface.get_str("priority") {
        writeln!(output, " isis priority {priority}")?;
    }
    if let Some(interval) = iface.get_str("psnp_interval") {
        writeln!(output, " isis psnp-interval {interval}")?;
    }
    if iface.exists("no_three_way_handshake") {
        writeln!(output, " no isis three-way-handshake")?;
    }
    writeln!(output, "exit")?;
    writeln!(output, "!")
}

fn render_router(
    output: &mut String,
    domain: &str,
    tree: &ConfigTree,
) -> std::fmt::Result {
    writeln!(output, "router isis {domain}")?;
    for net in tree.keys("net") {
        writeln!(output, " net {net}")?;
    }

    // Flags.
    for (key, statement) in [
        ("dynamic_hostname", "hostname dynamic"),
        ("purge_originator", "purge-originator"),
        ("set_attached_bit", "set-attached-bit"),
        ("set_overload_bit", "set-overload-bit"),
    ] {
        if tree.exists(key) {
            writeln!(output, " {statement}")?;
        }
    }
    if let Some(password) = tree.get_str("domain_password.md5") {
        writeln!(output, " domain-password md5 {password}")?;
    } else if let Some(password) =
        tree.get_str("domain_password.plaintext_password")
    {
        writeln!(output, " domain-password clear {password}")?;
    }
    if tree.exists("log_adjacency_changes") {
        writeln!(output, " log-adjacency-changes")?;
    }

    // LSP parameters.
    for (key, statement) in [
        ("lsp_gen_interval", "lsp-gen-interval"),
        ("lsp_mtu", "lsp-mtu"),
        ("lsp_refresh_interval", "lsp-refresh-interval"),
        ("max_lsp_lifetime", "max-lsp-lifetime"),
        ("metric_style", "metric-style"),
    ] {
        if let Some(value) = tree.get_str(key) {
            writeln!(output, " {statement} {value}")?;
        }
    }
    if let Some(level) = tree.get_str("level") {
        writeln!(output, " is-type {}", is_type(&level))?;
    }

    render_segment_routing(output, tree)?;

    if tree.exists("spf_delay_ietf") {
        let timer = |name: &str| {
            tree.get_str(&format!("spf_delay_ietf.{name}"))
                .unwrap_or_default()
        };
        writeln!(
            output,
            " spf-delay-ietf init-delay {} short-delay {} long-delay {} holddown {} time-to-learn {}",
            timer("init_delay"),
            timer("short_delay"),
            timer("long_delay"),
            timer("holddown"),
            timer("time_to_learn"),
        )?;
    }
    if let Some(password) = tree.get_str("area_password.md5") {
        writeln!(output, " area-password md5 {password}")?;
    } else if let Some(password) =
        tree.get_str("area_password.plaintext_password")
    {
        writeln!(output, " area-password clear {password}")?;
    }

    for (afi, afi_tree) in tree.entries("default_information.originate") {
        for (level, level_tree) in afi_tree.entries("") {
            write!(
                output,
                " default-information originate {afi} {}",
                display(&level)
            )?;
            if level_tree.exists("always") {
                write!(output, " always")?;
            }
            if let Some(route_map) = level_tree.get_str("route_map") {
                write!(output, " route-map {route_map}")?;
            }
            if let Some(metric) = level_tree.get_str("metric") {
                write!(output, " metric {metric}")?;
            }
            writeln!(output)?;
        }
    }

    for (afi, afi_tree) in tree.entries("redistribute") {
        for (proto, proto_tree) in afi_tree.entries("") {
            for (level, level_tree) in proto_tree.entries("") {
                write!(
                    output,
                    " redistribute {afi} {proto} {}",
                    display(&level)
                )?;
                if let Some(metric) = level_tree.get_str("metric") {
                    write!(output, " metric {metric}")?;
                }
                if let Some(route_map) = level_tree.get_str("route_map") {
                    write!(output, " route-map {route_map}")?;
                }
                writeln!(output)?;
            }
        }
    }

    if let Some(interval) = tree.get_str("spf_interval") {
        writeln!(output, " spf-interval {interval}")?;
    }
    writeln!(output, "exit")?;
    writeln!(output, "!")
}

fn render_segment_routing(
    output: &mut String,
    tree: &ConfigTree,
) -> std::fmt::Result {
    if !tree.exists("segment_routing") {
        return Ok(());
    }

    writeln!(output, " segment-routing on")?;
    if let Some(msd) = tree.get_str("segment_routing.maximum_label_depth") {
        writeln!(output, " segment-routing node-msd {msd}")?;
    }

    let block = |name: &str| {
        let low = tree.get_str(&format!(
            "segment_routing.{name}.low_label_value"
        ))?;
        let high = tree.get_str(&format!(
            "segment_routing.{name}.high_label_value"
        ))?;
        Some((low, high))
    };
    if let Some((low, high)) = block("global_block") {
        write!(output, " segment-routing global-block {low} {high}")?;
        if let Some((low, high)) = block("local_block") {
            write!(output, " local-block {low} {high}")?;
        }
        writeln!(output)?;
    }

    for (prefix, prefix_tree) in tree.entries("segment_routing.prefix") {
        for kind in ["absolute", "index"] {
            let Some(value) = prefix_tree.get_str(&format!("{kind}.value"))
            else {
                continue;
            };
            write!(output, " segment-routing prefix {prefix} {kind} {value}")?;
            if prefix_tree.exists(&format!("{kind}.explicit_null")) {
                write!(output, " explicit-null")?;
            } else if prefix_tree.exists(&format!("{kind}.no_php_flag")) {
                write!(output, " no-php-flag")?;
            }
            writeln!(output)?;
        }
    }

    Ok(())
}

// Converts a configured level into FRR's is-type/circuit-type keyword.
fn is_type(level: &str) -> String {
    match display(level).as_str() {
        "level-2" => "level-2-only".to_owned(),
        level => level.to_owned(),
    }
}

// Converts an internal key into its display form.
fn display(key: &str) -> String {
    key.replace('_', "-")
}

// ===== unit tests =====
