//! ABC 分析主流程

use abc_core::{AbcConfig, RawTable, TransactionRow};
use rust_decimal::Decimal;

use crate::{AbcResult, AbcWarning, Aggregator, CategorySummarizer, Classifier, Ranker};

/// ABC 分析器
///
/// 依序執行：驗證門檻 → 物料彙總 → 排序與累積 → 分類 → 類別彙總。
/// 不持有任何跨次執行的狀態。
pub struct AbcAnalyzer {
    config: AbcConfig,
}

impl AbcAnalyzer {
    /// 創建新的 ABC 分析器
    pub fn new(config: AbcConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AbcConfig {
        &self.config
    }

    /// 從原始表格執行分析
    pub fn analyze_table(&self, table: &RawTable) -> abc_core::Result<AbcResult> {
        self.config.validate()?;
        let rows = table.transaction_rows()?;
        self.analyze(&rows)
    }

    /// 主分析入口
    pub fn analyze(&self, rows: &[TransactionRow]) -> abc_core::Result<AbcResult> {
        tracing::info!("開始 ABC 分析：明細 {} 筆", rows.len());
        let start_time = std::time::Instant::now();

        // 門檻驗證（任何一列處理前）
        self.config.validate()?;

        // Step 1: 物料彙總
        tracing::debug!("Step 1: 物料彙總");
        let summaries = Aggregator::aggregate(rows)?;
        tracing::debug!("物料數量: {}", summaries.len());

        let mut result = AbcResult::empty();
        result.material_count = summaries.len();

        for material_id in Aggregator::description_conflicts(rows) {
            tracing::warn!("物料 {} 的描述不一致，採用第一個描述", material_id);
            result.add_warning(AbcWarning::warning(
                Some(material_id),
                "物料描述不一致，採用第一個非空描述".to_string(),
            ));
        }

        for summary in summaries.iter().filter(|s| s.total_value < Decimal::ZERO) {
            result.add_warning(AbcWarning::warning(
                Some(summary.material_id.clone()),
                format!("總價值為負 ({})，累積百分比可能不遞增", summary.total_value),
            ));
        }

        // Step 2: 排序與累積
        tracing::debug!("Step 2: 排序與累積百分比");
        result.grand_total_value = Ranker::grand_total(&summaries)?;
        result.grand_total_quantity = Ranker::grand_total_quantity(&summaries)?;
        let ranked = Ranker::rank(summaries)?;

        if !ranked.is_empty() && result.grand_total_value.is_zero() {
            tracing::warn!("總價值為零，採用策略 {:?}", self.config.zero_total_policy);
            result.add_warning(AbcWarning::error(
                None,
                format!(
                    "總價值為零，累積百分比無定義（策略: {:?}）",
                    self.config.zero_total_policy
                ),
            ));
        }

        // Step 3: 分類
        tracing::debug!("Step 3: ABC 分類");
        let categorized = Classifier::classify(
            ranked,
            &self.config.thresholds,
            self.config.zero_total_policy,
        )?;

        // Step 4: 類別彙總
        tracing::debug!("Step 4: 類別彙總");
        result.categories = CategorySummarizer::summarize(
            &categorized,
            &self.config.summary_columns,
            self.config.report_empty_categories,
        )?;
        result.items = categorized;
        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("ABC 分析完成，耗時 {:?}", start_time.elapsed());
        for category in &result.categories {
            tracing::info!(
                "類別 {}: 物料 {} 項，金額 {}",
                category.category,
                category.item_count,
                category.total_value
            );
        }

        Ok(result)
    }
}

impl Default for AbcAnalyzer {
    fn default() -> Self {
        Self::new(AbcConfig::default())
    }
}
