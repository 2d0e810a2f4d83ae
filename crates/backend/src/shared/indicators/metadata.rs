use contracts::shared::indicators::*;

/// Well-known indicator IDs (constants to avoid typos).
pub mod ids {
    use super::*;

    pub fn sales_revenue() -> IndicatorId {
        IndicatorId::new("sales_revenue")
    }
    pub fn sales_order_count() -> IndicatorId {
        IndicatorId::new("sales_order_count")
    }
    pub fn sales_avg_check() -> IndicatorId {
        IndicatorId::new("sales_avg_check")
    }
    pub fn unique_customers() -> IndicatorId {
        IndicatorId::new("unique_customers")
    }
    pub fn items_sold() -> IndicatorId {
        IndicatorId::new("items_sold")
    }
    pub fn total_cost() -> IndicatorId {
        IndicatorId::new("total_cost")
    }
    pub fn margin_percent() -> IndicatorId {
        IndicatorId::new("margin_percent")
    }
    pub fn roas() -> IndicatorId {
        IndicatorId::new("roas")
    }
    pub fn roi_percent() -> IndicatorId {
        IndicatorId::new("roi_percent")
    }
}

/// Currency symbol used on money cards
pub const CURRENCY: &str = "R$";

/// Build the full catalogue of indicators + sets.
pub fn build_catalog() -> IndicatorCatalog {
    let money = || ValueFormat::Money {
        currency: CURRENCY.into(),
    };

    let indicators = vec![
        IndicatorMeta {
            id: ids::sales_revenue(),
            label: "Revenue".into(),
            short_label: None,
            icon: "dollar-sign".into(),
            format: money(),
            higher_is_good: true,
            description: Some("Sum of order totals in the window".into()),
        },
        IndicatorMeta {
            id: ids::sales_order_count(),
            label: "Orders".into(),
            short_label: None,
            icon: "orders".into(),
            format: ValueFormat::Integer,
            higher_is_good: true,
            description: None,
        },
        IndicatorMeta {
            id: ids::sales_avg_check(),
            label: "Average order value".into(),
            short_label: Some("AOV".into()),
            icon: "invoices".into(),
            format: money(),
            higher_is_good: true,
            description: Some("Revenue / Orders".into()),
        },
        IndicatorMeta {
            id: ids::unique_customers(),
            label: "Customers".into(),
            short_label: None,
            icon: "users".into(),
            format: ValueFormat::Integer,
            higher_is_good: true,
            description: Some("Distinct customer ids among the orders".into()),
        },
        IndicatorMeta {
            id: ids::items_sold(),
            label: "Items sold".into(),
            short_label: Some("Items".into()),
            icon: "package".into(),
            format: ValueFormat::Integer,
            higher_is_good: true,
            description: None,
        },
        IndicatorMeta {
            id: ids::total_cost(),
            label: "Cost of goods".into(),
            short_label: Some("Cost".into()),
            icon: "package-minus".into(),
            format: money(),
            higher_is_good: false,
            description: Some("Known product costs, 60% of the sale value where unknown".into()),
        },
        IndicatorMeta {
            id: ids::margin_percent(),
            label: "Margin".into(),
            short_label: None,
            icon: "percent".into(),
            format: ValueFormat::Percent { decimals: 1 },
            higher_is_good: true,
            description: Some("(Revenue - Cost) / Revenue".into()),
        },
        IndicatorMeta {
            id: ids::roas(),
            label: "ROAS".into(),
            short_label: None,
            icon: "trending-up".into(),
            format: ValueFormat::Number { decimals: 2 },
            higher_is_good: true,
            description: Some("Revenue / Cost".into()),
        },
        IndicatorMeta {
            id: ids::roi_percent(),
            label: "ROI".into(),
            short_label: None,
            icon: "activity".into(),
            format: ValueFormat::Percent { decimals: 1 },
            higher_is_good: true,
            description: Some("(Revenue - Cost) / Cost".into()),
        },
    ];

    let sets = vec![IndicatorSetMeta {
        id: IndicatorSetId::new("sales_overview"),
        label: "Sales overview".into(),
        indicators: vec![
            ids::sales_revenue(),
            ids::sales_order_count(),
            ids::sales_avg_check(),
            ids::unique_customers(),
            ids::items_sold(),
            ids::total_cost(),
            ids::margin_percent(),
            ids::roas(),
            ids::roi_percent(),
        ],
        columns: 3,
    }];

    IndicatorCatalog { indicators, sets }
}
