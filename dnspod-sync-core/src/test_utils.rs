//! 测试辅助模块
//!
//! 提供内存版 `DnspodApi` 和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dnspod_sync_provider::{
    DEFAULT_RECORD_LINE, DISABLED_FLAG, DnspodApi, Domain, ENABLED_FLAG, ProviderError, Record,
    RecordPayload, RecordType, Result,
};
use tokio::sync::RwLock;

// ===== MockDnspodApi =====

/// In-memory DNSPod account.
///
/// Unknown domain ids fail with code `6`, unknown record ids with code `8`,
/// like the real API.
pub struct MockDnspodApi {
    domains: RwLock<Vec<Domain>>,
    /// domain_id -> records, in creation order
    records: RwLock<HashMap<String, Vec<Record>>>,
    next_record_id: AtomicU64,
    /// 操作名 -> 注入的错误（持续生效）
    failures: RwLock<HashMap<&'static str, ProviderError>>,
    calls: RwLock<Vec<&'static str>>,
    /// `list_records` 的模拟耗时（毫秒）
    listing_delay_ms: AtomicU64,
    listings_in_flight: AtomicUsize,
    peak_listings: AtomicUsize,
}

impl MockDnspodApi {
    pub fn new() -> Self {
        Self {
            domains: RwLock::new(Vec::new()),
            records: RwLock::new(HashMap::new()),
            next_record_id: AtomicU64::new(1),
            failures: RwLock::new(HashMap::new()),
            calls: RwLock::new(Vec::new()),
            listing_delay_ms: AtomicU64::new(0),
            listings_in_flight: AtomicUsize::new(0),
            peak_listings: AtomicUsize::new(0),
        }
    }

    pub async fn add_domain(&self, id: &str, name: &str) {
        self.domains.write().await.push(Domain {
            id: id.to_string(),
            name: name.to_string(),
        });
        self.records
            .write()
            .await
            .entry(id.to_string())
            .or_default();
    }

    pub async fn add_record(&self, record: Record) {
        self.records
            .write()
            .await
            .entry(record.domain_id.clone())
            .or_default()
            .push(record);
    }

    pub fn set_next_record_id(&self, id: u64) {
        self.next_record_id.store(id, Ordering::SeqCst);
    }

    /// Make every `list_records` call take `delay`.
    pub fn set_listing_delay(&self, delay: Duration) {
        let ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.listing_delay_ms.store(ms, Ordering::SeqCst);
    }

    /// Most `list_records` calls seen running at the same time.
    pub fn peak_listings(&self) -> usize {
        self.peak_listings.load(Ordering::SeqCst)
    }

    /// Make every later call of `op` fail with `err`.
    pub async fn fail(&self, op: &'static str, err: ProviderError) {
        self.failures.write().await.insert(op, err);
    }

    /// Names of the trait methods called so far, in order.
    pub async fn calls(&self) -> Vec<&'static str> {
        self.calls.read().await.clone()
    }

    pub async fn record(&self, domain_id: &str, record_id: &str) -> Option<Record> {
        self.records
            .read()
            .await
            .get(domain_id)?
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
    }

    async fn enter(&self, op: &'static str) -> Result<()> {
        self.calls.write().await.push(op);
        match self.failures.read().await.get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn apply_payload(record: &mut Record, payload: &RecordPayload) {
        record.sub_domain.clone_from(&payload.sub_domain);
        record.record_type = payload.record_type.clone();
        record.record_line.clone_from(&payload.record_line);
        record.value.clone_from(&payload.value);
        record.mx = payload.mx.map(u16::from);
        record.ttl = payload.ttl;
        record.weight = payload.weight;
        record.enabled = if payload.status == "disable" {
            DISABLED_FLAG.to_string()
        } else {
            ENABLED_FLAG.to_string()
        };
    }
}

#[async_trait]
impl DnspodApi for MockDnspodApi {
    async fn list_domains(&self) -> Result<Vec<Domain>> {
        self.enter("list_domains").await?;
        Ok(self.domains.read().await.clone())
    }

    async fn list_records(&self, domain_id: &str) -> Result<Vec<Record>> {
        self.enter("list_records").await?;

        let running = self.listings_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_listings.fetch_max(running, Ordering::SeqCst);
        let delay = self.listing_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        self.listings_in_flight.fetch_sub(1, Ordering::SeqCst);

        self.records
            .read()
            .await
            .get(domain_id)
            .cloned()
            .ok_or_else(|| api_error("Record.List", "6", "Domain id invalid"))
    }

    async fn create_record(&self, payload: &RecordPayload) -> Result<String> {
        self.enter("create_record").await?;
        let mut records = self.records.write().await;
        let Some(list) = records.get_mut(&payload.domain_id) else {
            return Err(api_error("Record.Create", "6", "Domain id invalid"));
        };
        let id = self.next_record_id.fetch_add(1, Ordering::SeqCst).to_string();
        let mut record = remote_record(
            &payload.domain_id,
            &id,
            &payload.sub_domain,
            payload.record_type.clone(),
            &payload.value,
        );
        Self::apply_payload(&mut record, payload);
        list.push(record);
        Ok(id)
    }

    async fn read_record(&self, domain_id: &str, record_id: &str) -> Result<Record> {
        self.enter("read_record").await?;
        let records = self.records.read().await;
        let list = records
            .get(domain_id)
            .ok_or_else(|| api_error("Record.Info", "6", "Domain id invalid"))?;
        list.iter()
            .find(|r| r.id == record_id)
            .cloned()
            .ok_or_else(|| api_error("Record.Info", "8", "Record id invalid"))
    }

    async fn update_record(
        &self,
        domain_id: &str,
        record_id: &str,
        payload: &RecordPayload,
    ) -> Result<()> {
        self.enter("update_record").await?;
        let mut records = self.records.write().await;
        let list = records
            .get_mut(domain_id)
            .ok_or_else(|| api_error("Record.Modify", "6", "Domain id invalid"))?;
        let record = list
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| api_error("Record.Modify", "8", "Record id invalid"))?;
        Self::apply_payload(record, payload);
        Ok(())
    }

    async fn delete_record(&self, domain_id: &str, record_id: &str) -> Result<()> {
        self.enter("delete_record").await?;
        let mut records = self.records.write().await;
        let list = records
            .get_mut(domain_id)
            .ok_or_else(|| api_error("Record.Remove", "6", "Domain id invalid"))?;
        let before = list.len();
        list.retain(|r| r.id != record_id);
        if list.len() == before {
            return Err(api_error("Record.Remove", "8", "Record id invalid"));
        }
        Ok(())
    }

    async fn set_remark(&self, domain_id: &str, record_id: &str, remark: &str) -> Result<()> {
        self.enter("set_remark").await?;
        let mut records = self.records.write().await;
        let record = records
            .get_mut(domain_id)
            .and_then(|list| list.iter_mut().find(|r| r.id == record_id))
            .ok_or_else(|| api_error("Record.Remark", "8", "Record id invalid"))?;
        record.remark = remark.to_string();
        Ok(())
    }
}

// ===== 工厂方法 =====

/// `ProviderError::Api` as the HTTP client would produce it.
pub fn api_error(action: &str, code: &str, message: &str) -> ProviderError {
    ProviderError::Api {
        action: action.to_string(),
        code: code.to_string(),
        message: message.to_string(),
    }
}

/// An enabled record on the default line with TTL 600.
pub fn remote_record(
    domain_id: &str,
    id: &str,
    sub_domain: &str,
    record_type: RecordType,
    value: &str,
) -> Record {
    Record {
        id: id.to_string(),
        domain_id: domain_id.to_string(),
        sub_domain: sub_domain.to_string(),
        record_type,
        record_line: DEFAULT_RECORD_LINE.to_string(),
        value: value.to_string(),
        mx: None,
        ttl: 600,
        weight: None,
        enabled: ENABLED_FLAG.to_string(),
        remark: String::new(),
        updated_on: None,
    }
}
