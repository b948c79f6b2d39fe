//! 上傳資料集的會話狀態

use std::sync::Arc;

use abc_calc::{monitoring, AbcAnalyzer, AbcResult, InventoryOverview};
use abc_core::{AbcConfig, AbcError, RawTable, Result, TransactionRow};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// 上傳識別碼
pub type UploadId = Uuid;

/// 一次上傳的資料快照（不可變）
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    /// 上傳ID
    pub id: UploadId,

    /// 上傳時間
    pub uploaded_at: DateTime<Utc>,

    /// 來源名稱（例如檔名）
    pub source: Option<String>,

    /// 異動明細
    pub rows: Vec<TransactionRow>,
}

/// 庫存分析會話
///
/// 每次上傳整批取代前一份資料；分析只讀取快照，不修改已存資料。
#[derive(Debug, Default)]
pub struct InventorySession {
    current: Option<Arc<Dataset>>,
}

impl InventorySession {
    /// 創建空的會話
    pub fn new() -> Self {
        Self::default()
    }

    /// 上傳原始表格，取代目前資料集
    ///
    /// 缺少必要欄位或儲存格無效時失敗，且保留原本的資料集。
    pub fn upload(&mut self, table: &RawTable) -> Result<UploadId> {
        self.upload_named(table, None)
    }

    /// 上傳並記錄來源名稱
    pub fn upload_named(&mut self, table: &RawTable, source: Option<String>) -> Result<UploadId> {
        let rows = table.transaction_rows()?;
        Ok(self.replace(rows, source))
    }

    /// 直接以異動明細取代目前資料集
    pub fn replace(&mut self, rows: Vec<TransactionRow>, source: Option<String>) -> UploadId {
        let dataset = Dataset {
            id: Uuid::new_v4(),
            uploaded_at: Utc::now(),
            source,
            rows,
        };
        let id = dataset.id;

        tracing::info!("資料集已更新: {} ({} 筆)", id, dataset.rows.len());
        self.current = Some(Arc::new(dataset));
        id
    }

    /// 目前資料集的快照
    pub fn snapshot(&self) -> Option<Arc<Dataset>> {
        self.current.clone()
    }

    /// 是否已有資料
    pub fn has_data(&self) -> bool {
        self.current.is_some()
    }

    /// 清除資料集
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// 對目前資料集執行 ABC 分析
    pub fn analyze(&self, config: &AbcConfig) -> Result<AbcResult> {
        let dataset = self.require_snapshot()?;
        AbcAnalyzer::new(config.clone()).analyze(&dataset.rows)
    }

    /// 目前資料集的概況
    pub fn overview(&self) -> Result<InventoryOverview> {
        let dataset = self.require_snapshot()?;
        monitoring::overview(&dataset.rows)
    }

    fn require_snapshot(&self) -> Result<Arc<Dataset>> {
        self.snapshot()
            .ok_or_else(|| AbcError::Other("尚未上傳資料集".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abc_core::table::{COL_AMOUNT, COL_DESCRIPTION, COL_MATERIAL, COL_QUANTITY};
    use abc_core::{AbcCategory, Cell};
    use rust_decimal::Decimal;

    fn table(values: &[(&str, i64)]) -> RawTable {
        RawTable::new(
            vec![
                COL_MATERIAL.to_string(),
                COL_DESCRIPTION.to_string(),
                COL_QUANTITY.to_string(),
                COL_AMOUNT.to_string(),
            ],
            values
                .iter()
                .map(|(id, amount)| {
                    vec![
                        Cell::Text(id.to_string()),
                        Cell::Text(format!("Desc {}", id)),
                        Cell::Number(Decimal::ONE),
                        Cell::Number(Decimal::from(*amount)),
                    ]
                })
                .collect(),
        )
    }

    #[test]
    fn test_analyze_without_data() {
        let session = InventorySession::new();
        assert!(!session.has_data());
        assert!(matches!(
            session.analyze(&AbcConfig::default()),
            Err(AbcError::Other(_))
        ));
        assert!(session.overview().is_err());
    }

    #[test]
    fn test_upload_replaces_dataset() {
        let mut session = InventorySession::new();
        let first = session.upload(&table(&[("M-1", 100)])).unwrap();
        let snapshot = session.snapshot().unwrap();

        let second = session
            .upload_named(&table(&[("M-2", 10), ("M-3", 20)]), Some("march.xlsx".into()))
            .unwrap();

        assert_ne!(first, second);
        // 舊快照不受新上傳影響
        assert_eq!(snapshot.rows.len(), 1);
        let current = session.snapshot().unwrap();
        assert_eq!(current.rows.len(), 2);
        assert_eq!(current.source.as_deref(), Some("march.xlsx"));
    }

    #[test]
    fn test_failed_upload_keeps_previous_dataset() {
        let mut session = InventorySession::new();
        let id = session.upload(&table(&[("M-1", 100)])).unwrap();

        let broken = RawTable::new(vec![COL_MATERIAL.to_string()], vec![]);
        assert!(matches!(session.upload(&broken), Err(AbcError::MissingColumn(_))));
        assert_eq!(session.snapshot().unwrap().id, id);
    }

    #[test]
    fn test_repeated_analysis_is_identical() {
        let mut session = InventorySession::new();
        session
            .upload(&table(&[("M-1", 700), ("M-2", 200), ("M-3", 100)]))
            .unwrap();

        let config = AbcConfig::default();
        let first = session.analyze(&config).unwrap();
        let second = session.analyze(&config).unwrap();

        assert_eq!(first.items, second.items);
        assert_eq!(first.categories, second.categories);
        assert_eq!(
            first.items.iter().map(|i| i.category).collect::<Vec<_>>(),
            vec![AbcCategory::A, AbcCategory::B, AbcCategory::C]
        );
    }

    #[test]
    fn test_overview_and_clear() {
        let mut session = InventorySession::new();
        session.upload(&table(&[("M-1", 5), ("M-1", 7)])).unwrap();

        let overview = session.overview().unwrap();
        assert_eq!(overview.material_count, 1);
        assert_eq!(overview.total_value, Decimal::from(12));

        session.clear();
        assert!(session.snapshot().is_none());
    }
}
