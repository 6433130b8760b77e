//! 记录资源的创建 / 读取 / 更新 / 删除

use std::sync::Arc;

use dnspod_sync_provider::DnspodApi;

use crate::classifier::{Classified, classify};
use crate::error::{CoreError, CoreResult};
use crate::identity::{IdentityCodec, RecordIdentity};
use crate::types::{
    ApplyOutcome, DeleteOutcome, ReadOutcome, RecordResource, RecordSpec, UpdateOutcome,
};

/// Drives one [`RecordResource`] through its lifecycle.
///
/// Every method is one remote round trip (two when a remark has to be
/// written). A record that turns out to be gone remotely clears
/// `RecordResource::id` and is reported through the outcome, not as an error.
pub struct RecordReconciler {
    api: Arc<dyn DnspodApi>,
    codec: IdentityCodec,
}

/// Log a failure at the level its kind deserves and hand it back.
fn report(action: &str, err: impl Into<CoreError>) -> CoreError {
    let err = err.into();
    if err.is_expected() {
        log::warn!("{action}: {err}");
    } else {
        log::error!("{action}: {err}");
    }
    err
}

impl RecordReconciler {
    #[must_use]
    pub fn new(api: Arc<dyn DnspodApi>, codec: IdentityCodec) -> Self {
        Self { api, codec }
    }

    fn tracked_identity(&self, res: &RecordResource) -> CoreResult<Option<RecordIdentity>> {
        res.id.as_deref().map(|id| self.codec.decode(id)).transpose()
    }

    /// Create the record described by `res.spec` and start tracking it.
    ///
    /// If the remark cannot be written after creation the error is returned
    /// but `res.id` stays set: the record exists and can still be deleted.
    pub async fn create(&self, res: &mut RecordResource) -> CoreResult<()> {
        if let Some(id) = &res.id {
            return Err(CoreError::Validation(format!(
                "record is already tracked as {id}"
            )));
        }
        let payload = res.spec.to_payload(&res.spec.domain_id)?;

        let record_id = self
            .api
            .create_record(&payload)
            .await
            .map_err(|e| report("Record.Create", e))?;
        let id = self.codec.encode(&payload.domain_id, &record_id);
        log::info!("Created record {id} ({} {})", payload.sub_domain, payload.record_type);
        res.id = Some(id);

        if !res.spec.remark.is_empty() {
            self.api
                .set_remark(&payload.domain_id, &record_id, &res.spec.remark)
                .await
                .map_err(|e| report("Record.Remark", e))?;
        }
        Ok(())
    }

    /// Refresh `res.spec` from the remote record.
    pub async fn read(&self, res: &mut RecordResource) -> CoreResult<ReadOutcome> {
        let Some(identity) = self.tracked_identity(res)? else {
            return Ok(ReadOutcome::Untracked);
        };

        match classify(
            self.api
                .read_record(&identity.domain_id, &identity.record_id)
                .await,
        ) {
            Classified::Ok(record) => {
                res.spec = RecordSpec::from_remote(&identity.domain_id, record)
                    .map_err(|e| report("Record.Info", e))?;
                Ok(ReadOutcome::Present)
            }
            Classified::Drifted => {
                log::warn!("Record {identity} no longer exists, dropping it from state");
                res.id = None;
                Ok(ReadOutcome::Untracked)
            }
            Classified::Fatal(e) => Err(report("Record.Info", e)),
        }
    }

    /// Bring the tracked record to `desired`.
    ///
    /// The record is modified in place under its current identity; a
    /// different `desired.domain_id` is not applied here (see [`Self::apply`]).
    pub async fn update(
        &self,
        res: &mut RecordResource,
        desired: RecordSpec,
    ) -> CoreResult<UpdateOutcome> {
        let Some(identity) = self.tracked_identity(res)? else {
            return Err(CoreError::InvalidFormat(
                "record is not tracked, nothing to update".to_string(),
            ));
        };
        let payload = desired.to_payload(&identity.domain_id)?;

        match classify(
            self.api
                .update_record(&identity.domain_id, &identity.record_id, &payload)
                .await,
        ) {
            Classified::Ok(()) => {}
            Classified::Drifted => {
                log::warn!("Record {identity} no longer exists, dropping it from state");
                res.id = None;
                return Ok(UpdateOutcome::NoLongerPresent);
            }
            Classified::Fatal(e) => return Err(report("Record.Modify", e)),
        }

        let remark_changed = desired.remark != res.spec.remark;
        let remark = desired.remark.clone();
        let previous_remark = std::mem::take(&mut res.spec.remark);
        res.spec = RecordSpec {
            remark: previous_remark,
            ..desired
        };

        if remark_changed {
            self.api
                .set_remark(&identity.domain_id, &identity.record_id, &remark)
                .await
                .map_err(|e| report("Record.Remark", e))?;
            res.spec.remark = remark;
        }

        log::info!("Updated record {identity}");
        Ok(UpdateOutcome::Updated)
    }

    /// Remove the tracked record.
    ///
    /// `res.id` is cleared unless the remote call fails for a reason other
    /// than the record already being gone.
    pub async fn delete(&self, res: &mut RecordResource) -> CoreResult<DeleteOutcome> {
        let Some(identity) = self.tracked_identity(res)? else {
            return Ok(DeleteOutcome::Untracked);
        };

        let outcome = match classify(
            self.api
                .delete_record(&identity.domain_id, &identity.record_id)
                .await,
        ) {
            Classified::Ok(()) => {
                log::info!("Deleted record {identity}");
                DeleteOutcome::Deleted
            }
            Classified::Drifted => {
                log::info!("Record {identity} was already gone");
                DeleteOutcome::AlreadyGone
            }
            Classified::Fatal(e) => return Err(report("Record.Remove", e)),
        };
        res.id = None;
        Ok(outcome)
    }

    /// Start tracking an existing record by identity.
    ///
    /// Returns `None` when no such record exists.
    pub async fn adopt(&self, identity: &str) -> CoreResult<Option<RecordResource>> {
        let identity = self.codec.decode(identity)?;

        match classify(
            self.api
                .read_record(&identity.domain_id, &identity.record_id)
                .await,
        ) {
            Classified::Ok(record) => {
                let spec = RecordSpec::from_remote(&identity.domain_id, record)
                    .map_err(|e| report("Record.Info", e))?;
                log::info!("Adopted record {identity}");
                Ok(Some(RecordResource {
                    id: Some(identity.to_string()),
                    spec,
                }))
            }
            Classified::Drifted => {
                log::warn!("Record {identity} does not exist");
                Ok(None)
            }
            Classified::Fatal(e) => Err(report("Record.Info", e)),
        }
    }

    /// Refresh, then create, update or replace so the remote record matches
    /// `desired`.
    ///
    /// Moving a record to another domain cannot be done in place: it is
    /// deleted from the old domain and created in the new one.
    pub async fn apply(
        &self,
        res: &mut RecordResource,
        desired: RecordSpec,
    ) -> CoreResult<ApplyOutcome> {
        let desired = desired.normalized();
        // 先校验，避免替换时删掉旧记录后才发现新配置无效
        desired.to_payload(&desired.domain_id)?;

        if let Some(identity) = self.tracked_identity(res)?
            && identity.domain_id != desired.domain_id
        {
            log::info!(
                "Record {identity} moves to domain {}, replacing it",
                desired.domain_id
            );
            self.delete(res).await?;
            res.spec = desired;
            self.create(res).await?;
            return Ok(ApplyOutcome::Replaced);
        }

        match self.read(res).await? {
            ReadOutcome::Untracked => {
                res.spec = desired;
                self.create(res).await?;
                Ok(ApplyOutcome::Created)
            }
            ReadOutcome::Present if res.spec == desired => Ok(ApplyOutcome::Unchanged),
            ReadOutcome::Present => match self.update(res, desired.clone()).await? {
                UpdateOutcome::Updated => Ok(ApplyOutcome::Updated),
                UpdateOutcome::NoLongerPresent => {
                    res.spec = desired;
                    self.create(res).await?;
                    Ok(ApplyOutcome::Recreated)
                }
            },
        }
    }
}
