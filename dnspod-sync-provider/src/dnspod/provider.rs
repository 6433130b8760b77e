//! `DnspodApi` implementation over the legacy form API

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{PROVIDER_NAME, Result};
use crate::traits::{DnspodApi, ProviderErrorMapper};
use crate::types::{Domain, Record, RecordPayload};

use super::{
    DnspodProvider, DomainListResponse, RecordCreateResponse, RecordInfoResponse,
    RecordListResponse,
};

/// Success body of calls whose payload is ignored.
#[derive(Deserialize)]
struct Ack {}

fn field(key: &str, value: impl Into<String>) -> (String, String) {
    (key.to_string(), value.into())
}

impl DnspodProvider {
    fn page_fields(&self, offset: usize) -> [(String, String); 2] {
        [
            field("offset", offset.to_string()),
            field("length", self.page_size.to_string()),
        ]
    }
}

/// Whether another page should be fetched after `fetched` items, the last
/// page holding `page_len` of them.
fn has_more(fetched: usize, page_len: usize, total: Option<u32>) -> bool {
    if page_len == 0 {
        return false;
    }
    total
        .and_then(|total| usize::try_from(total).ok())
        .is_some_and(|total| fetched < total)
}

#[async_trait]
impl DnspodApi for DnspodProvider {
    async fn list_domains(&self) -> Result<Vec<Domain>> {
        let mut domains = Vec::new();
        loop {
            let resp: DomainListResponse = self
                .request("Domain.List", self.page_fields(domains.len()).to_vec())
                .await?;
            let page_len = resp.domains.len();
            let total = resp.info.and_then(|i| i.domain_total);
            domains.extend(resp.domains.into_iter().map(Domain::from));
            if !has_more(domains.len(), page_len, total) {
                break;
            }
        }
        log::debug!("[{PROVIDER_NAME}] listed {} domains", domains.len());
        Ok(domains)
    }

    async fn list_records(&self, domain_id: &str) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        loop {
            let mut fields = vec![field("domain_id", domain_id)];
            fields.extend(self.page_fields(records.len()));
            let resp: RecordListResponse = self.request("Record.List", fields).await?;
            let page_len = resp.records.len();
            let total = resp.info.and_then(|i| i.records_num);
            for record in resp.records {
                records.push(record.into_record(domain_id)?);
            }
            if !has_more(records.len(), page_len, total) {
                break;
            }
        }
        log::debug!(
            "[{PROVIDER_NAME}] listed {} records of domain {domain_id}",
            records.len()
        );
        Ok(records)
    }

    async fn create_record(&self, payload: &RecordPayload) -> Result<String> {
        let resp: RecordCreateResponse = self
            .request("Record.Create", payload.form_fields())
            .await?;
        if resp.record.id.is_empty() {
            return Err(self.parse_error("Record.Create returned an empty record id"));
        }
        Ok(resp.record.id)
    }

    async fn read_record(&self, domain_id: &str, record_id: &str) -> Result<Record> {
        let resp: RecordInfoResponse = self
            .request(
                "Record.Info",
                vec![field("domain_id", domain_id), field("record_id", record_id)],
            )
            .await?;
        resp.record.into_record(domain_id)
    }

    async fn update_record(
        &self,
        domain_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<()> {
        let mut fields = vec![field("domain_id", domain_id), field("record_id", record_id)];
        fields.extend(
            payload
                .form_fields()
                .into_iter()
                .filter(|(k, _)| k != "domain_id"),
        );
        let _: Ack = self.request("Record.Modify", fields).await?;
        Ok(())
    }

    async fn delete_record(&self, domain_id: &str, record_id: &str) -> Result<()> {
        let _: Ack = self
            .request(
                "Record.Remove",
                vec![field("domain_id", domain_id), field("record_id", record_id)],
            )
            .await?;
        Ok(())
    }

    async fn set_remark(&self, domain_id: &str, record_id: &str, remark: &str) -> Result<()> {
        let _: Ack = self
            .request(
                "Record.Remark",
                vec![
                    field("domain_id", domain_id),
                    field("record_id", record_id),
                    field("remark", remark),
                ],
            )
            .await?;
        Ok(())
    }
}
