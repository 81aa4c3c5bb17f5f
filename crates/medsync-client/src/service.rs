//! # Supply Service Facade
//!
//! One typed method per endpoint operation.
//!
//! ## Failure Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Facade Failure Policy                               │
//! │                                                                         │
//! │  READ actions (getInventory, getSuppliers, ...)                        │
//! │  ├── transport/protocol failure ──► Ok(Fetched::fallback(seed rows))   │
//! │  │                                  + warn! on the diagnostic channel  │
//! │  └── success:false envelope ──────► Err(SyncError::Remote(message))    │
//! │                                                                         │
//! │  MUTATING actions and AUTH (add/update/delete, authenticate, ...)      │
//! │  └── every failure ───────────────► Err(...) unchanged, no fallback    │
//! │                                                                         │
//! │  logActivity                                                           │
//! │  └── every failure ───────────────► swallowed (warn! only)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads carry provenance: [`Fetched::source`] tells the caller whether the
//! rows are live or substituted demo data, so a UI can badge outages
//! instead of silently presenting seeds as truth.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use medsync_core::{
    ActivityEntry, Branch, BranchPatch, Customer, CustomerPatch, DashboardSnapshot, DateRange,
    InventoryItem, InventoryPatch, NewUser, Report, ReportType, Settings, SettingsPatch,
    Supplier, SupplierPatch, Transaction, TransactionPatch, Transfer, TransferPatch, User,
};

use crate::config::ClientConfig;
use crate::error::{SyncError, SyncResult};
use crate::export::ExportFile;
use crate::fallback;
use crate::gateway::{HttpGateway, ScriptTransport};
use crate::protocol::Action;

// =============================================================================
// Read Provenance
// =============================================================================

/// Where a read result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Rows answered by the endpoint.
    Live,
    /// Seed rows substituted because the endpoint was unreachable.
    Fallback,
}

/// A read result with its provenance.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Fetched<T> {
    fn live(data: T) -> Self {
        Fetched {
            data,
            source: DataSource::Live,
        }
    }

    fn fallback(data: T) -> Self {
        Fetched {
            data,
            source: DataSource::Fallback,
        }
    }

    /// True when the rows are substituted seed data.
    pub fn is_fallback(&self) -> bool {
        self.source == DataSource::Fallback
    }
}

// =============================================================================
// Supply Service
// =============================================================================

/// The domain service facade over the script endpoint.
pub struct SupplyService {
    transport: Arc<dyn ScriptTransport>,
}

impl SupplyService {
    /// Builds the facade over an arbitrary transport.
    pub fn new(transport: Arc<dyn ScriptTransport>) -> Self {
        SupplyService { transport }
    }

    /// Builds the facade over the HTTP gateway described by `config`.
    pub fn from_config(config: &ClientConfig) -> SyncResult<Self> {
        Ok(Self::new(Arc::new(HttpGateway::new(config)?)))
    }

    // =========================================================================
    // Core Helpers
    // =========================================================================

    /// One read action with fallback substitution.
    ///
    /// Transport and protocol failures are converted into the substitute
    /// dataset; a well-formed rejection passes through as a domain error.
    async fn read<T, F>(&self, action: Action, payload: Value, substitute: F) -> SyncResult<Fetched<T>>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.transport.send(action, payload).await {
            Ok(envelope) => {
                if !envelope.success {
                    return Err(SyncError::Remote(envelope.error.unwrap_or_else(|| {
                        format!("{} failed without a message", action)
                    })));
                }
                let value = envelope.data.unwrap_or(Value::Null);
                match serde_json::from_value::<T>(value) {
                    Ok(data) => Ok(Fetched::live(data)),
                    Err(e) => {
                        warn!(action = %action, error = %e, "Unreadable payload, substituting fallback data");
                        Ok(Fetched::fallback(substitute()))
                    }
                }
            }
            Err(e) if e.is_substitutable() => {
                warn!(action = %action, error = %e, "Endpoint unavailable, substituting fallback data");
                Ok(Fetched::fallback(substitute()))
            }
            Err(e) => Err(e),
        }
    }

    /// One mutating action. Failures pass through unchanged.
    async fn mutate(&self, action: Action, payload: Value) -> SyncResult<Option<Value>> {
        let envelope = self.transport.send(action, payload).await?;
        if envelope.success {
            Ok(envelope.data)
        } else {
            Err(SyncError::Remote(envelope.error.unwrap_or_else(|| {
                format!("{} was rejected by the endpoint", action)
            })))
        }
    }

    /// Serializes a patch as the flattened `{id, ...patch}` update payload.
    fn flattened<P: Serialize>(id: &str, patch: &P) -> SyncResult<Value> {
        let mut value = serde_json::to_value(patch)?;
        let object = value.as_object_mut().ok_or_else(|| {
            SyncError::SerializationFailed("patch must serialize to an object".into())
        })?;
        object.insert("id".into(), Value::String(id.to_string()));
        Ok(value)
    }

    /// Parses the record a successful `add` echoed back, if any.
    fn parse_echo<T: DeserializeOwned>(action: Action, value: Value) -> Option<T> {
        match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(action = %action, error = %e, "Ignoring unreadable add echo");
                None
            }
        }
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    pub async fn get_inventory(&self) -> SyncResult<Fetched<Vec<InventoryItem>>> {
        self.read(Action::GetInventory, json!({}), fallback::inventory)
            .await
    }

    pub async fn add_inventory_item(
        &self,
        item: &InventoryItem,
    ) -> SyncResult<Option<InventoryItem>> {
        let data = self
            .mutate(Action::AddInventoryItem, json!({ "item": item }))
            .await?;
        Ok(data.and_then(|v| Self::parse_echo(Action::AddInventoryItem, v)))
    }

    pub async fn update_inventory_item(&self, id: &str, patch: &InventoryPatch) -> SyncResult<()> {
        let payload = Self::flattened(id, patch)?;
        self.mutate(Action::UpdateInventoryItem, payload).await?;
        Ok(())
    }

    pub async fn delete_inventory_item(&self, id: &str) -> SyncResult<()> {
        self.mutate(Action::DeleteInventoryItem, json!({ "id": id }))
            .await?;
        Ok(())
    }

    // =========================================================================
    // Transfers
    // =========================================================================

    pub async fn get_transfers(&self) -> SyncResult<Fetched<Vec<Transfer>>> {
        self.read(Action::GetTransfers, json!({}), fallback::transfers)
            .await
    }

    pub async fn add_transfer(&self, transfer: &Transfer) -> SyncResult<Option<Transfer>> {
        let data = self
            .mutate(Action::AddTransfer, json!({ "transfer": transfer }))
            .await?;
        Ok(data.and_then(|v| Self::parse_echo(Action::AddTransfer, v)))
    }

    pub async fn update_transfer(&self, id: &str, patch: &TransferPatch) -> SyncResult<()> {
        let payload = Self::flattened(id, patch)?;
        self.mutate(Action::UpdateTransfer, payload).await?;
        Ok(())
    }

    // =========================================================================
    // Suppliers
    // =========================================================================

    pub async fn get_suppliers(&self) -> SyncResult<Fetched<Vec<Supplier>>> {
        self.read(Action::GetSuppliers, json!({}), fallback::suppliers)
            .await
    }

    pub async fn add_supplier(&self, supplier: &Supplier) -> SyncResult<Option<Supplier>> {
        let data = self
            .mutate(Action::AddSupplier, json!({ "supplier": supplier }))
            .await?;
        Ok(data.and_then(|v| Self::parse_echo(Action::AddSupplier, v)))
    }

    pub async fn update_supplier(&self, id: &str, patch: &SupplierPatch) -> SyncResult<()> {
        let payload = Self::flattened(id, patch)?;
        self.mutate(Action::UpdateSupplier, payload).await?;
        Ok(())
    }

    pub async fn delete_supplier(&self, id: &str) -> SyncResult<()> {
        self.mutate(Action::DeleteSupplier, json!({ "id": id }))
            .await?;
        Ok(())
    }

    // =========================================================================
    // Customers
    // =========================================================================

    pub async fn get_customers(&self) -> SyncResult<Fetched<Vec<Customer>>> {
        self.read(Action::GetCustomers, json!({}), fallback::customers)
            .await
    }

    pub async fn add_customer(&self, customer: &Customer) -> SyncResult<Option<Customer>> {
        let data = self
            .mutate(Action::AddCustomer, json!({ "customer": customer }))
            .await?;
        Ok(data.and_then(|v| Self::parse_echo(Action::AddCustomer, v)))
    }

    pub async fn update_customer(&self, id: &str, patch: &CustomerPatch) -> SyncResult<()> {
        let payload = Self::flattened(id, patch)?;
        self.mutate(Action::UpdateCustomer, payload).await?;
        Ok(())
    }

    pub async fn delete_customer(&self, id: &str) -> SyncResult<()> {
        self.mutate(Action::DeleteCustomer, json!({ "id": id }))
            .await?;
        Ok(())
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    pub async fn get_transactions(&self) -> SyncResult<Fetched<Vec<Transaction>>> {
        self.read(Action::GetTransactions, json!({}), fallback::transactions)
            .await
    }

    pub async fn add_transaction(
        &self,
        transaction: &Transaction,
    ) -> SyncResult<Option<Transaction>> {
        let data = self
            .mutate(Action::AddTransaction, json!({ "transaction": transaction }))
            .await?;
        Ok(data.and_then(|v| Self::parse_echo(Action::AddTransaction, v)))
    }

    pub async fn update_transaction(&self, id: &str, patch: &TransactionPatch) -> SyncResult<()> {
        let payload = Self::flattened(id, patch)?;
        self.mutate(Action::UpdateTransaction, payload).await?;
        Ok(())
    }

    pub async fn delete_transaction(&self, id: &str) -> SyncResult<()> {
        self.mutate(Action::DeleteTransaction, json!({ "id": id }))
            .await?;
        Ok(())
    }

    // =========================================================================
    // Branches
    // =========================================================================

    pub async fn get_branches(&self) -> SyncResult<Fetched<Vec<Branch>>> {
        self.read(Action::GetBranches, json!({}), fallback::branches)
            .await
    }

    pub async fn add_branch(&self, branch: &Branch) -> SyncResult<Option<Branch>> {
        let data = self
            .mutate(Action::AddBranch, json!({ "branch": branch }))
            .await?;
        Ok(data.and_then(|v| Self::parse_echo(Action::AddBranch, v)))
    }

    pub async fn update_branch(&self, id: &str, patch: &BranchPatch) -> SyncResult<()> {
        let payload = Self::flattened(id, patch)?;
        self.mutate(Action::UpdateBranch, payload).await?;
        Ok(())
    }

    pub async fn delete_branch(&self, id: &str) -> SyncResult<()> {
        self.mutate(Action::DeleteBranch, json!({ "id": id })).await?;
        Ok(())
    }

    // =========================================================================
    // Dashboard & Activity
    // =========================================================================

    pub async fn get_dashboard_stats(&self) -> SyncResult<Fetched<DashboardSnapshot>> {
        self.read(Action::GetDashboardStats, json!({}), fallback::dashboard)
            .await
    }

    pub async fn get_recent_activity(&self) -> SyncResult<Fetched<Vec<ActivityEntry>>> {
        self.read(Action::GetRecentActivity, json!({}), fallback::recent_activity)
            .await
    }

    // =========================================================================
    // Reports & Export
    // =========================================================================

    pub async fn generate_report(
        &self,
        report_type: ReportType,
        range: Option<DateRange>,
    ) -> SyncResult<Fetched<Report>> {
        let mut payload = json!({ "reportType": report_type });
        if let Some(r) = range {
            payload["dateRange"] = serde_json::to_value(r)?;
        }
        self.read(Action::GenerateReport, payload, move || {
            fallback::report(report_type, range)
        })
        .await
    }

    pub async fn export_report_as_excel(
        &self,
        report_type: ReportType,
        range: Option<DateRange>,
    ) -> SyncResult<ExportFile> {
        self.export(Action::ExportReportAsExcel, report_type, range, "xlsx")
            .await
    }

    pub async fn export_report_as_pdf(
        &self,
        report_type: ReportType,
        range: Option<DateRange>,
    ) -> SyncResult<ExportFile> {
        self.export(Action::ExportReportAsPdf, report_type, range, "pdf")
            .await
    }

    /// Server-side export: the endpoint renders the file and streams it
    /// back base64-encoded. No fallback exists for exports.
    async fn export(
        &self,
        action: Action,
        report_type: ReportType,
        range: Option<DateRange>,
        extension: &str,
    ) -> SyncResult<ExportFile> {
        let mut payload = json!({ "reportType": report_type, "format": extension });
        if let Some(r) = range {
            payload["dateRange"] = serde_json::to_value(r)?;
        }

        let data = self.mutate(action, payload).await?.ok_or_else(|| {
            SyncError::UnexpectedPayload {
                action: action.to_string(),
                reason: "no export payload in response".into(),
            }
        })?;

        ExportFile::from_wire(action, report_type, extension, data)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub async fn get_settings(&self) -> SyncResult<Fetched<Settings>> {
        self.read(Action::GetSettings, json!({}), fallback::settings)
            .await
    }

    pub async fn update_settings(&self, patch: &SettingsPatch) -> SyncResult<()> {
        let payload = serde_json::to_value(patch)?;
        self.mutate(Action::UpdateSettings, payload).await?;
        Ok(())
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Authenticates against the endpoint. No fallback: a dead endpoint
    /// means no login.
    pub async fn authenticate(&self, username: &str, password: &str) -> SyncResult<User> {
        let envelope = self
            .transport
            .send(
                Action::Authenticate,
                json!({ "username": username, "password": password }),
            )
            .await?;

        if !envelope.success {
            return Err(SyncError::Remote(
                envelope.error.unwrap_or_else(|| "Invalid credentials".into()),
            ));
        }

        let value = envelope
            .user
            .or(envelope.data)
            .ok_or_else(|| SyncError::UnexpectedPayload {
                action: Action::Authenticate.to_string(),
                reason: "no user object in response".into(),
            })?;

        serde_json::from_value(value).map_err(|e| SyncError::UnexpectedPayload {
            action: Action::Authenticate.to_string(),
            reason: e.to_string(),
        })
    }

    pub async fn register_user(&self, user: &NewUser) -> SyncResult<()> {
        self.mutate(Action::RegisterUser, json!({ "user": user }))
            .await?;
        Ok(())
    }

    pub async fn logout(&self) -> SyncResult<()> {
        self.mutate(Action::Logout, json!({})).await?;
        Ok(())
    }

    // =========================================================================
    // Audit & Health
    // =========================================================================

    /// Fire-and-forget audit write. Never fails the caller: every error is
    /// swallowed after a diagnostic `warn!`.
    pub async fn log_activity(&self, activity: Value) {
        match self
            .transport
            .send(Action::LogActivity, json!({ "activity": activity }))
            .await
        {
            Ok(envelope) if envelope.success => {}
            Ok(envelope) => {
                warn!(error = ?envelope.error, "Activity log rejected by endpoint");
            }
            Err(e) => {
                warn!(error = %e, "Activity log failed");
            }
        }
    }

    /// Lightweight connectivity probe. Any failure reads as "offline".
    pub async fn test_connection(&self) -> bool {
        match self.transport.send(Action::TestConnection, json!({})).await {
            Ok(envelope) => envelope.success,
            Err(e) => {
                debug!(error = %e, "Connection test failed");
                false
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubTransport;
    use medsync_core::TransferStatus;

    fn service(stub: &Arc<StubTransport>) -> SupplyService {
        SupplyService::new(stub.clone() as Arc<dyn ScriptTransport>)
    }

    #[tokio::test]
    async fn test_read_failure_substitutes_fallback() {
        let stub = StubTransport::new();
        stub.push_err(SyncError::Timeout(30));
        let service = service(&stub);

        let fetched = service.get_suppliers().await.unwrap();
        assert!(fetched.is_fallback());
        assert_eq!(fetched.data, fallback::suppliers());
    }

    #[tokio::test]
    async fn test_every_read_action_has_a_fallback() {
        // Each read call against a dead endpoint must still produce rows.
        let stub = StubTransport::new();
        for _ in 0..7 {
            stub.push_err(SyncError::ConnectionFailed("dns".into()));
        }
        let service = service(&stub);

        assert!(service.get_inventory().await.unwrap().is_fallback());
        assert!(service.get_transfers().await.unwrap().is_fallback());
        assert!(service.get_customers().await.unwrap().is_fallback());
        assert!(service.get_transactions().await.unwrap().is_fallback());
        assert!(service.get_branches().await.unwrap().is_fallback());
        assert!(service.get_dashboard_stats().await.unwrap().is_fallback());
        assert!(service.get_settings().await.unwrap().is_fallback());
    }

    #[tokio::test]
    async fn test_read_success_is_live() {
        let stub = StubTransport::new();
        stub.push_ok(serde_json::to_value(fallback::inventory()).unwrap());
        let service = service(&stub);

        let fetched = service.get_inventory().await.unwrap();
        assert_eq!(fetched.source, DataSource::Live);
        assert_eq!(fetched.data.len(), 3);
    }

    #[tokio::test]
    async fn test_read_rejection_passes_through() {
        let stub = StubTransport::new();
        stub.push_rejected("Sheet quota exceeded");
        let service = service(&stub);

        let err = service.get_inventory().await.unwrap_err();
        assert!(err.is_domain_error());
        assert_eq!(err.to_string(), "Sheet quota exceeded");
    }

    #[tokio::test]
    async fn test_unreadable_read_payload_substitutes_fallback() {
        let stub = StubTransport::new();
        stub.push_ok(json!({ "rows": "not an array" }));
        let service = service(&stub);

        let fetched = service.get_suppliers().await.unwrap();
        assert!(fetched.is_fallback());
    }

    #[tokio::test]
    async fn test_mutation_failure_has_no_fallback() {
        let stub = StubTransport::new();
        stub.push_err(SyncError::Timeout(30));
        let service = service(&stub);

        let err = service.delete_supplier("SUP001").await.unwrap_err();
        assert!(matches!(err, SyncError::Timeout(30)));
    }

    #[tokio::test]
    async fn test_mutation_rejection_carries_server_message() {
        let stub = StubTransport::new();
        stub.push_rejected("Supplier has open orders");
        let service = service(&stub);

        let err = service.delete_supplier("SUP001").await.unwrap_err();
        assert_eq!(err.to_string(), "Supplier has open orders");
    }

    #[tokio::test]
    async fn test_update_payload_is_flattened() {
        let stub = StubTransport::new();
        stub.push_ok(Value::Null);
        let service = service(&stub);

        let patch = InventoryPatch {
            current_stock: Some(40),
            ..Default::default()
        };
        service.update_inventory_item("INV002", &patch).await.unwrap();

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        let (action, payload) = &calls[0];
        assert_eq!(*action, Action::UpdateInventoryItem);
        // Flattened {id, ...patch}: no nested "updates" object.
        assert_eq!(payload["id"], "INV002");
        assert_eq!(payload["currentStock"], 40);
        assert!(payload.get("updates").is_none());
    }

    #[tokio::test]
    async fn test_add_wraps_record_in_named_field() {
        let stub = StubTransport::new();
        stub.push_ok(Value::Null);
        let service = service(&stub);

        let rows = fallback::suppliers();
        service.add_supplier(&rows[0]).await.unwrap();

        let calls = stub.calls();
        assert_eq!(calls[0].0, Action::AddSupplier);
        assert_eq!(calls[0].1["supplier"]["id"], "SUP001");
    }

    #[tokio::test]
    async fn test_add_parses_echo() {
        let stub = StubTransport::new();
        let echoed = &fallback::inventory()[0];
        stub.push_ok(serde_json::to_value(echoed).unwrap());
        let service = service(&stub);

        let result = service.add_inventory_item(echoed).await.unwrap();
        assert_eq!(result.as_ref().map(|i| i.id.as_str()), Some("INV001"));
    }

    #[tokio::test]
    async fn test_authenticate_reads_user_field() {
        let stub = StubTransport::new();
        stub.push_envelope(crate::protocol::ScriptResponse {
            success: true,
            data: None,
            error: None,
            user: Some(json!({
                "id": "USR001",
                "username": "admin",
                "name": "Administrator",
                "email": "admin@rama.com",
                "role": "admin"
            })),
        });
        let service = service(&stub);

        let user = service.authenticate("admin", "secret").await.unwrap();
        assert_eq!(user.id, "USR001");
        assert_eq!(user.role, medsync_core::UserRole::Admin);
    }

    #[tokio::test]
    async fn test_authenticate_failure_is_not_substituted() {
        let stub = StubTransport::new();
        stub.push_err(SyncError::ConnectionFailed("offline".into()));
        let service = service(&stub);

        assert!(service.authenticate("admin", "secret").await.is_err());
    }

    #[tokio::test]
    async fn test_log_activity_swallows_all_errors() {
        let stub = StubTransport::new();
        stub.push_err(SyncError::Timeout(30));
        let service = service(&stub);

        // Unit return: nothing to unwrap, nothing to propagate.
        service.log_activity(json!({ "action": "Login" })).await;

        stub.push_rejected("quota");
        service.log_activity(json!({ "action": "Login" })).await;
    }

    #[tokio::test]
    async fn test_test_connection_maps_failures_to_false() {
        let stub = StubTransport::new();
        stub.push_err(SyncError::ConnectionFailed("offline".into()));
        let service = service(&stub);
        assert!(!service.test_connection().await);

        stub.push_ok(Value::Null);
        assert!(service.test_connection().await);
    }

    #[tokio::test]
    async fn test_transfer_status_patch_round_trip() {
        let stub = StubTransport::new();
        stub.push_ok(Value::Null);
        let service = service(&stub);

        let patch = TransferPatch::status(TransferStatus::Approved);
        service.update_transfer("TR001", &patch).await.unwrap();

        let calls = stub.calls();
        assert_eq!(calls[0].1["id"], "TR001");
        assert_eq!(calls[0].1["status"], "approved");
    }

    #[tokio::test]
    async fn test_generate_report_fallback_by_family() {
        let stub = StubTransport::new();
        stub.push_err(SyncError::HttpStatus(502));
        let service = service(&stub);

        let report = service
            .generate_report(ReportType::Financial, None)
            .await
            .unwrap();
        assert!(report.is_fallback());
        assert_eq!(report.data.data["revenue"], 1_200_000);
    }
}
