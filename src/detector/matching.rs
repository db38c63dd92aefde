//! 列シグネチャ照合
//!
//! 抽出したヘッダーを判別ルールへ突き合わせる。照合は大文字小文字を
//! 区別する部分一致で、シグネチャの6割（切り上げ）が見つかれば一致。

use super::rules::{DetectionRule, DETECTION_RULES};

/// 一致と判定する最低一致数（シグネチャ長の6割、切り上げ）
pub fn threshold(signature_len: usize) -> usize {
    (signature_len as f64 * 0.6).ceil() as usize
}

/// ルールのシグネチャのうちヘッダーに見つかった数を数える
///
/// 1つのヘッダーが複数のシグネチャを同時に満たしてもよい（消費しない）。
fn count_signature_matches(headers: &[String], rule: &DetectionRule) -> usize {
    rule.signature
        .iter()
        .copied()
        .filter(|sig| headers.iter().any(|header| header.contains(sig)))
        .count()
}

/// ヘッダー一覧をルールに照合する
///
/// 定義順に評価し、しきい値に達した最初のルールを返す（先勝ち）。
/// 複数ルールがしきい値を満たしうる場合も順序で暗黙に解決する。
pub fn match_headers<'a>(
    headers: &[String],
    rules: &'a [DetectionRule],
) -> Option<&'a DetectionRule> {
    rules
        .iter()
        .find(|rule| count_signature_matches(headers, rule) >= threshold(rule.signature.len()))
}

/// ルールごとの一致状況（verbose表示用）
#[derive(Debug)]
pub struct RuleMatchCount {
    pub file_type: &'static str,
    pub matched: usize,
    pub signature_len: usize,
    pub threshold: usize,
}

/// 全ルールの一致数としきい値を集計する
pub fn count_matches(headers: &[String]) -> Vec<RuleMatchCount> {
    DETECTION_RULES
        .iter()
        .map(|rule| RuleMatchCount {
            file_type: rule.file_type,
            matched: count_signature_matches(headers, rule),
            signature_len: rule.signature.len(),
            threshold: threshold(rule.signature.len()),
        })
        .collect()
}

/// ファイル名からの推測に使うコードトークン（優先順）
const FILENAME_TOKENS: &[(&str, &str)] = &[
    ("zrpp062", "ZRPP062"),
    ("zrsd006", "ZRSD006"),
    ("cooispi", "COOISPI"),
    ("mb51", "MB51"),
    ("zrmm024", "ZRMM024"),
    ("zrsd002", "ZRSD002"),
    ("zrsd004", "ZRSD004"),
    ("zrfi005", "ZRFI005"),
    ("target", "TARGET"),
];

/// ファイル名から帳票種別コードを推測する
///
/// ヘッダー判別が不成立のときのフォールバック。小文字化したファイル名に
/// 既知のコードが含まれるかを優先順に調べる。
pub fn guess_from_filename(filename: &str) -> Option<&'static str> {
    let lower = filename.to_lowercase();

    FILENAME_TOKENS
        .iter()
        .find(|(token, _)| lower.contains(token))
        .map(|(_, file_type)| *file_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::rules::find_by_type;

    fn headers_of(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_threshold_rounds_up() {
        // 4トークンなら2.4ではなく3が必要
        assert_eq!(threshold(4), 3);
        assert_eq!(threshold(5), 3);
        assert_eq!(threshold(3), 2);
        assert_eq!(threshold(1), 1);
    }

    #[test]
    fn test_full_signature_detects_every_rule() {
        // 全ルール: シグネチャをそのままヘッダーにすれば必ずそのルールに一致する
        for rule in DETECTION_RULES {
            let headers: Vec<String> = rule.signature.iter().map(|s| s.to_string()).collect();
            let detected = match_headers(&headers, DETECTION_RULES)
                .unwrap_or_else(|| panic!("{}が判別できない", rule.file_type));
            assert_eq!(detected.file_type, rule.file_type);
        }
    }

    #[test]
    fn test_zrpp062_exact_headers() {
        let headers = headers_of(&[
            "MRP controller",
            "Product Group 1",
            "Product Group 2",
            "Process Order",
            "Batch",
        ]);
        let rule = match_headers(&headers, DETECTION_RULES).unwrap();
        assert_eq!(rule.file_type, "ZRPP062");
        assert!(rule.requires_period);
    }

    #[test]
    fn test_cooispi_partial_match() {
        // 4トークン中3つ（75%）でしきい値3に到達する
        let headers = headers_of(&["Plant", "Sales Order", "Order"]);
        let rule = match_headers(&headers, DETECTION_RULES).unwrap();
        assert_eq!(rule.file_type, "COOISPI");
        assert!(!rule.requires_period);
    }

    #[test]
    fn test_below_threshold_not_detected() {
        let rules: &[DetectionRule] = &[DetectionRule {
            file_type: "TEST4",
            signature: &["Alpha", "Beta", "Gamma", "Delta"],
            label: "Test",
            requires_period: false,
            endpoint: "/api/v1/upload",
        }];

        // ちょうどしきい値（3/4）で一致
        let at_threshold = headers_of(&["Alpha", "Beta", "Gamma"]);
        assert!(match_headers(&at_threshold, rules).is_some());

        // しきい値未満（2/4）は不一致
        let below = headers_of(&["Alpha", "Beta"]);
        assert!(match_headers(&below, rules).is_none());
    }

    #[test]
    fn test_first_match_wins() {
        // 両ルールのしきい値を同時に満たすヘッダーでは定義順の先勝ち
        let rules: &[DetectionRule] = &[
            DetectionRule {
                file_type: "FIRST",
                signature: &["Shared A", "Shared B"],
                label: "First",
                requires_period: false,
                endpoint: "/api/v1/upload",
            },
            DetectionRule {
                file_type: "SECOND",
                signature: &["Shared A", "Shared B", "Extra"],
                label: "Second",
                requires_period: false,
                endpoint: "/api/v1/upload",
            },
        ];

        let headers = headers_of(&["Shared A", "Shared B", "Extra"]);
        let rule = match_headers(&headers, rules).unwrap();
        assert_eq!(rule.file_type, "FIRST");
    }

    #[test]
    fn test_substring_containment_is_permissive() {
        // "Actual GI Date"は"Delivery Date"も"Delivery"も含まないが、
        // シグネチャトークンを部分文字列として含むヘッダーは一致する
        let rules: &[DetectionRule] = &[DetectionRule {
            file_type: "SUBSTR",
            signature: &["GI Date", "Delivery"],
            label: "Substr",
            requires_period: false,
            endpoint: "/api/v1/upload",
        }];

        let headers = headers_of(&["Actual GI Date", "Outbound Delivery No"]);
        assert!(match_headers(&headers, rules).is_some());
    }

    #[test]
    fn test_one_header_satisfies_multiple_tokens() {
        // 1つのヘッダーが複数トークンを同時に満たせる（消費されない）
        let rules: &[DetectionRule] = &[DetectionRule {
            file_type: "MULTI",
            signature: &["Order", "Sales Order"],
            label: "Multi",
            requires_period: false,
            endpoint: "/api/v1/upload",
        }];

        let headers = headers_of(&["Sales Order"]);
        assert!(match_headers(&headers, rules).is_some());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let headers = headers_of(&["plant", "sales order", "order"]);
        assert!(match_headers(&headers, DETECTION_RULES).is_none());
    }

    #[test]
    fn test_empty_headers_no_match() {
        assert!(match_headers(&[], DETECTION_RULES).is_none());
    }

    #[test]
    fn test_count_matches_reports_all_rules() {
        let headers = headers_of(&["Plant", "Sales Order", "Order"]);
        let counts = count_matches(&headers);
        assert_eq!(counts.len(), DETECTION_RULES.len());

        let cooispi = counts.iter().find(|c| c.file_type == "COOISPI").unwrap();
        assert_eq!(cooispi.matched, 3);
        assert_eq!(cooispi.signature_len, 4);
        assert_eq!(cooispi.threshold, 3);
    }

    #[test]
    fn test_guess_from_filename() {
        assert_eq!(guess_from_filename("report_ZRFI005_jan.xlsx"), Some("ZRFI005"));
        assert_eq!(guess_from_filename("mb51_2025.xlsx"), Some("MB51"));
        assert_eq!(guess_from_filename("COOISPI Export.xlsx"), Some("COOISPI"));
        assert_eq!(guess_from_filename("sales_target_2025.xlsx"), Some("TARGET"));
        assert_eq!(guess_from_filename("monthly_report.xlsx"), None);
    }

    #[test]
    fn test_guess_resolves_to_registry_rule() {
        // 推測コードは完全一致でレジストリに解決できる
        let guessed = guess_from_filename("report_zrfi005.xlsx").unwrap();
        let rule = find_by_type(guessed).unwrap();
        assert_eq!(rule.file_type, "ZRFI005");
        assert_eq!(rule.label, "AR Aging Report");
    }

    #[test]
    fn test_guess_priority_order() {
        // 複数コードを含むファイル名はトークン表の先勝ち
        assert_eq!(guess_from_filename("zrpp062_and_mb51.xlsx"), Some("ZRPP062"));
        assert_eq!(guess_from_filename("mb51_target.xlsx"), Some("MB51"));
    }
}
