//! 帳票判別ルールレジストリ
//!
//! SAP帳票ごとに期待される列ヘッダーのシグネチャを定義する。
//! レジストリは起動後不変で、判別は定義順に評価される（先勝ち）。

/// 帳票判別ルール
#[derive(Debug)]
pub struct DetectionRule {
    /// 帳票種別コード（SAPレポート名）
    pub file_type: &'static str,
    /// 列ヘッダーに含まれることを期待する部分文字列
    pub signature: &'static [&'static str],
    /// 表示名
    pub label: &'static str,
    /// アップロード前に対象期間（年月）の入力が必要か
    pub requires_period: bool,
    /// アップロード先エンドポイント
    pub endpoint: &'static str,
}

/// 判別ルール一覧（定義順 = 優先順）
pub static DETECTION_RULES: &[DetectionRule] = &[
    DetectionRule {
        file_type: "ZRPP062",
        signature: &[
            "MRP controller",
            "Product Group 1",
            "Product Group 2",
            "Process Order",
            "Batch",
        ],
        label: "Production Yield Result",
        requires_period: true, // 年月の入力が必要
        endpoint: "/api/v3/yield/upload",
    },
    DetectionRule {
        file_type: "ZRSD006",
        signature: &["Material Code", "PH 1", "PH 2", "PH 3"],
        label: "Product Hierarchy Master",
        requires_period: false,
        endpoint: "/api/v3/yield/upload-master-data",
    },
    DetectionRule {
        file_type: "COOISPI",
        signature: &["Plant", "Sales Order", "Order", "Material Number"],
        label: "Production Orders",
        requires_period: false,
        endpoint: "/api/v1/upload",
    },
    DetectionRule {
        file_type: "MB51",
        signature: &[
            "Posting Date",
            "Movement Type",
            "Material Document",
            "Qty in Un. of Entry",
            "Storage Location",
        ],
        label: "Material Movements",
        requires_period: false,
        endpoint: "/api/v1/upload",
    },
    DetectionRule {
        file_type: "ZRMM024",
        signature: &[
            "Purch. Order",
            "Item",
            "Purch. Date",
            "Suppl. Plant",
            "Dest. Plant",
        ],
        label: "MRP Controller",
        requires_period: false,
        endpoint: "/api/v1/upload",
    },
    DetectionRule {
        file_type: "ZRSD002",
        signature: &["Billing Document", "Net Value", "Billing Date", "Material"],
        label: "Sales Orders",
        requires_period: false,
        endpoint: "/api/v1/upload",
    },
    DetectionRule {
        file_type: "ZRSD004",
        signature: &["Delivery Date", "Actual GI Date", "Delivery", "SO Reference"],
        label: "Delivery",
        requires_period: false,
        endpoint: "/api/v1/upload",
    },
    DetectionRule {
        file_type: "ZRFI005",
        signature: &[
            "Company Code",
            "Profit Center",
            "Customer Code",
            "Target 1-30 Days",
        ],
        label: "AR Aging Report",
        requires_period: false,
        endpoint: "/api/v1/upload",
    },
    DetectionRule {
        file_type: "TARGET",
        signature: &["Salesman Name", "Semester", "Year", "Target"],
        label: "Sales Targets",
        requires_period: false,
        endpoint: "/api/v1/upload",
    },
];

/// 種別コードの完全一致でルールを検索する（部分一致ではない）
pub fn find_by_type(file_type: &str) -> Option<&'static DetectionRule> {
    DETECTION_RULES.iter().find(|r| r.file_type == file_type)
}
