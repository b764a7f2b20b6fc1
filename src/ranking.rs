//! 排序与汇总
//!
//! 只依赖 `meets_inclusion_criteria` 与 `overall_score`，不看 `recommendation`。

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::models::paper::PaperRecord;

/// 领域缺失时的归类标签
pub const UNSPECIFIED_DOMAIN: &str = "Unspecified";

/// 筛选满足纳入标准的论文，按总分降序排列
///
/// 同分保持加载顺序（稳定排序）。
pub fn rank(records: &[PaperRecord]) -> Vec<&PaperRecord> {
    let mut included: Vec<&PaperRecord> = records.iter().filter(|r| r.is_included()).collect();
    included.sort_by_key(|r| Reverse(r.overall_score()));
    included
}

/// 表格报告使用的顺序：先纳入后排除，再按总分降序（稳定）
pub fn report_order(records: &[PaperRecord]) -> Vec<&PaperRecord> {
    let mut ordered: Vec<&PaperRecord> = records.iter().collect();
    ordered.sort_by_key(|r| (Reverse(r.is_included()), Reverse(r.overall_score())));
    ordered
}

/// 频次表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<String, usize>,
}

impl FrequencyTable {
    pub fn add(&mut self, key: impl Into<String>) {
        *self.counts.entry(key.into()).or_insert(0) += 1;
    }

    pub fn get(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 所有计数之和
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// 按计数降序，同计数按键升序
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> =
            self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by_key(|&(_, count)| Reverse(count));
        entries
    }

    /// 前 n 项（截断由展示层决定）
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries = self.ranked();
        entries.truncate(n);
        entries
    }
}

/// 跨论文汇总统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregates {
    pub domain_counts: FrequencyTable,
    pub technique_counts: FrequencyTable,
    pub challenge_counts: FrequencyTable,
}

/// 汇总纳入论文的领域、技术与挑战
///
/// 只统计满足纳入标准的论文，传入的未纳入论文会被忽略。
pub fn aggregate(records: &[&PaperRecord]) -> Aggregates {
    let mut aggregates = Aggregates::default();

    for judgment in records
        .iter()
        .filter(|r| r.is_included())
        .filter_map(|r| r.judgment.as_ref())
    {
        let domain = judgment.healthcare_domain.trim();
        if domain.is_empty() {
            aggregates.domain_counts.add(UNSPECIFIED_DOMAIN);
        } else {
            aggregates.domain_counts.add(domain);
        }

        for technique in &judgment.ai_techniques {
            aggregates.technique_counts.add(technique.as_str());
        }
        for challenge in &judgment.challenges_identified {
            aggregates.challenge_counts.add(challenge.as_str());
        }
    }

    aggregates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::judgment::{JudgmentRecord, Recommendation};

    fn judged(name: &str, included: bool, score: u32, domain: &str) -> PaperRecord {
        let mut judgment = JudgmentRecord::from_error("unused");
        judgment.error = None;
        judgment.meets_inclusion_criteria = included;
        judgment.overall_score = score;
        judgment.healthcare_domain = domain.to_string();
        judgment.recommendation = if included {
            Recommendation::Include
        } else {
            Recommendation::Exclude
        };
        let mut record = PaperRecord::new(name, format!("papers/{}", name), "text");
        record.judgment = Some(judgment);
        record
    }

    fn names<'a>(records: &[&'a PaperRecord]) -> Vec<&'a str> {
        records.iter().map(|r| r.filename.as_str()).collect()
    }

    #[test]
    fn test_rank_stable_on_ties() {
        let records = vec![
            judged("A", true, 40, "Radiology"),
            judged("B", true, 90, "Radiology"),
            judged("C", true, 90, "Oncology"),
        ];
        assert_eq!(names(&rank(&records)), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_rank_filters_on_inclusion_flag_only() {
        let mut records = vec![
            judged("A", false, 99, "x"),
            judged("B", true, 10, "x"),
            PaperRecord::new("C", "papers/C", "unjudged"),
            judged("D", true, 50, "x"),
        ];
        // 纳入标志与建议不一致时，以纳入标志为准
        records[1].judgment.as_mut().unwrap().recommendation = Recommendation::Exclude;

        assert_eq!(names(&rank(&records)), vec!["D", "B"]);
    }

    #[test]
    fn test_rank_excludes_error_judgments() {
        let mut failed = PaperRecord::new("X", "papers/X", "text");
        failed.judgment = Some(JudgmentRecord::from_error("timeout"));
        let records = vec![failed, judged("Y", true, 5, "x")];
        assert_eq!(names(&rank(&records)), vec!["Y"]);
    }

    #[test]
    fn test_rank_empty() {
        let records = vec![judged("A", false, 80, "x")];
        assert!(rank(&records).is_empty());
        assert!(rank(&[]).is_empty());
    }

    #[test]
    fn test_report_order() {
        let records = vec![
            judged("A", false, 95, "x"),
            judged("B", true, 30, "x"),
            judged("C", true, 60, "x"),
            judged("D", false, 95, "x"),
        ];
        assert_eq!(names(&report_order(&records)), vec!["C", "B", "A", "D"]);
    }

    #[test]
    fn test_aggregate_counts() {
        let mut records = vec![
            judged("A", true, 80, "Radiology"),
            judged("B", true, 70, "Radiology"),
            judged("C", true, 60, "  "),
            judged("D", false, 90, "Oncology"),
        ];
        let techniques = [vec!["CNN", "Transfer learning"], vec!["CNN"], vec![], vec!["LLM"]];
        for (record, list) in records.iter_mut().zip(techniques) {
            let judgment = record.judgment.as_mut().unwrap();
            judgment.ai_techniques = list.iter().map(|s| s.to_string()).collect();
            judgment.challenges_identified = vec!["Data quality".to_string()];
        }

        let ranked = rank(&records);
        let aggregates = aggregate(&ranked);

        assert_eq!(aggregates.domain_counts.get("Radiology"), 2);
        assert_eq!(aggregates.domain_counts.get(UNSPECIFIED_DOMAIN), 1);
        assert_eq!(aggregates.domain_counts.get("Oncology"), 0);
        assert_eq!(aggregates.domain_counts.total(), ranked.len());

        assert_eq!(aggregates.technique_counts.get("CNN"), 2);
        assert_eq!(aggregates.technique_counts.get("Transfer learning"), 1);
        assert_eq!(aggregates.technique_counts.get("LLM"), 0);
        assert_eq!(aggregates.challenge_counts.get("Data quality"), 3);
    }

    #[test]
    fn test_aggregate_ignores_excluded_even_if_passed() {
        let records = vec![judged("A", false, 80, "Radiology")];
        let all: Vec<&PaperRecord> = records.iter().collect();
        let aggregates = aggregate(&all);
        assert!(aggregates.domain_counts.is_empty());
    }

    #[test]
    fn test_frequency_table_ranking() {
        let mut table = FrequencyTable::default();
        for key in ["b", "a", "c", "c", "b", "c"] {
            table.add(key);
        }
        assert_eq!(table.ranked(), vec![("c", 3), ("b", 2), ("a", 1)]);
        assert_eq!(table.top(2), vec![("c", 3), ("b", 2)]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 6);

        let mut tied = FrequencyTable::default();
        tied.add("zeta");
        tied.add("alpha");
        assert_eq!(tied.ranked(), vec![("alpha", 1), ("zeta", 1)]);
    }
}
