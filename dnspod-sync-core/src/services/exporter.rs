//! 导出现有域名与记录为声明式配置及导入脚本

use std::fmt::{self, Write};
use std::sync::Arc;

use dnspod_sync_provider::{DnspodApi, Domain, Record};
use futures::stream::{self, StreamExt, TryStreamExt};

use crate::error::{CoreError, CoreResult};
use crate::identity::IdentityCodec;
use crate::types::{AdoptInstruction, DomainExport, RecordStatus, ResourceKind};
use crate::utils::naming::{domain_identifier, hcl_quote, record_identifier};

/// 同时进行的 `Record.List` 数量上限（DNSPod 对频繁调用返回 `-2`）
pub const DEFAULT_EXPORT_CONCURRENCY: usize = 4;

/// Snapshots remote domains and records.
pub struct Exporter {
    api: Arc<dyn DnspodApi>,
    codec: IdentityCodec,
    concurrency: usize,
}

impl Exporter {
    #[must_use]
    pub fn new(api: Arc<dyn DnspodApi>, codec: IdentityCodec) -> Self {
        Self {
            api,
            codec,
            concurrency: DEFAULT_EXPORT_CONCURRENCY,
        }
    }

    /// Limit how many domains have their records listed at once (at least 1).
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Export every domain, or only the one named `filter`.
    ///
    /// Records of up to `concurrency` domains are listed at a time; the
    /// result keeps the domain listing order. A filter matching nothing
    /// yields an empty result.
    pub async fn export(&self, filter: Option<&str>) -> CoreResult<Vec<DomainExport>> {
        let domains = self.api.list_domains().await?;

        let selected: Vec<Domain> = domains
            .into_iter()
            .filter(|domain| {
                log::info!("Domain: {} (id: {})", domain.name, domain.id);
                match filter {
                    Some(name) if name != domain.name => {
                        log::info!("domain {} is ignored", domain.name);
                        false
                    }
                    _ => true,
                }
            })
            .collect();

        if let Some(name) = filter
            && selected.is_empty()
        {
            log::warn!("No domain named {name} in this account, nothing exported");
        }

        stream::iter(selected)
            .map(|domain| self.export_domain(domain))
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    async fn export_domain(&self, domain: Domain) -> CoreResult<DomainExport> {
        let records = self.api.list_records(&domain.id).await?;
        log::debug!("Exporting {} records of {}", records.len(), domain.name);
        render_domain(&self.codec, domain, &records)
    }
}

/// Build the export of one domain from its listed records.
pub fn render_domain(
    codec: &IdentityCodec,
    domain: Domain,
    records: &[Record],
) -> CoreResult<DomainExport> {
    let identifier = domain_identifier(&domain.name);

    let mut blocks =
        vec![Block::new("dnspod_domain", &identifier).attr("domain", hcl_quote(&domain.name))];
    let mut instructions = vec![AdoptInstruction {
        kind: ResourceKind::Domain,
        identifier: identifier.clone(),
        remote_id: domain.id.clone(),
    }];

    for record in records {
        let record_ident = record_identifier(&domain.name, &record.sub_domain, &record.id);
        blocks.push(record_block(&identifier, &record_ident, record)?);
        instructions.push(AdoptInstruction {
            kind: ResourceKind::Record,
            identifier: record_ident,
            remote_id: codec.encode(&domain.id, &record.id),
        });
    }

    let config =
        render_blocks(&blocks).map_err(|e| CoreError::SerializationError(e.to_string()))?;
    let script = render_script(&instructions);

    Ok(DomainExport {
        domain,
        identifier,
        config,
        instructions,
        script,
    })
}

fn record_block(domain_ident: &str, record_ident: &str, record: &Record) -> CoreResult<Block> {
    let status = RecordStatus::from_enabled_flag(&record.enabled)?;

    let mut block = Block::new("dnspod_record", record_ident)
        .attr("domain_id", format!("dnspod_domain.{domain_ident}.id"))
        .attr("sub_domain", hcl_quote(&record.sub_domain))
        .attr("record_type", hcl_quote(record.record_type.as_str()))
        .attr("record_line", hcl_quote(&record.record_line))
        .attr("value", hcl_quote(&record.value));
    if record.record_type.is_mx()
        && let Some(mx) = record.mx
    {
        block = block.attr("mx", mx.to_string());
    }
    block = block.attr("ttl", record.ttl.to_string());
    if let Some(weight) = record.weight {
        block = block.attr("weight", weight.to_string());
    }
    block = block.attr("status", hcl_quote(status.as_str()));
    if !record.remark.is_empty() {
        block = block.attr("remark", hcl_quote(&record.remark));
    }
    Ok(block)
}

/// One `resource "<type>" "<name>" { ... }` block.
struct Block {
    resource_type: &'static str,
    name: String,
    attrs: Vec<(&'static str, String)>,
}

impl Block {
    fn new(resource_type: &'static str, name: &str) -> Self {
        Self {
            resource_type,
            name: name.to_string(),
            attrs: Vec::new(),
        }
    }

    fn attr(mut self, key: &'static str, value: String) -> Self {
        self.attrs.push((key, value));
        self
    }
}

fn render_blocks(blocks: &[Block]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        writeln!(out, "resource \"{}\" \"{}\" {{", block.resource_type, block.name)?;
        let width = block.attrs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        for (key, value) in &block.attrs {
            writeln!(out, "  {key:<width$} = {value}")?;
        }
        out.push_str("}\n");
    }
    Ok(out)
}

fn render_script(instructions: &[AdoptInstruction]) -> String {
    let mut script = String::from("set -o errexit\n");
    for instruction in instructions {
        script.push_str(&instruction.import_command());
        script.push('\n');
    }
    script
}
