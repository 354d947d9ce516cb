use crate::config::{AD_GROUP_NAME, CAMPAIGN_DAILY_BUDGET, RECORD_STATE_ENABLED};
use crate::types::{BulkRecord, ClassifiedTerm, MatchType, RecordType};

/// Campaign names for the exact, phrase and broad templates, in that order.
pub fn campaign_names(base_name: &str) -> [String; 3] {
    [
        format!("Exact | {base_name}"),
        format!("Phrase | {base_name}"),
        format!("Broad | {base_name}"),
    ]
}

/// Assemble the bulk upload sheet.
///
/// Campaign and Ad Group headers for every template come first. After them,
/// in input order, each Scale row adds an exact Keyword with its bid and each
/// Negative row adds a Negative Exact keyword. Both go into the exact
/// campaign. Other labels produce nothing.
pub fn build_bulk_records(terms: &[ClassifiedTerm], base_name: &str) -> Vec<BulkRecord> {
    let campaigns = campaign_names(base_name);
    let exact_campaign = &campaigns[0];

    let mut records = Vec::with_capacity(campaigns.len() * 2 + terms.len());
    for campaign in &campaigns {
        records.push(BulkRecord {
            record_type: RecordType::Campaign,
            campaign: campaign.clone(),
            ad_group: None,
            keyword_text: None,
            match_type: None,
            bid: None,
            state: RECORD_STATE_ENABLED.to_string(),
            daily_budget: Some(CAMPAIGN_DAILY_BUDGET),
        });
        records.push(BulkRecord {
            record_type: RecordType::AdGroup,
            campaign: campaign.clone(),
            ad_group: Some(AD_GROUP_NAME.to_string()),
            keyword_text: None,
            match_type: None,
            bid: None,
            state: RECORD_STATE_ENABLED.to_string(),
            daily_budget: None,
        });
    }

    for term in terms {
        if term.action.is_scale() {
            records.push(BulkRecord {
                record_type: RecordType::Keyword,
                campaign: exact_campaign.clone(),
                ad_group: Some(AD_GROUP_NAME.to_string()),
                keyword_text: Some(term.record.search_term.clone()),
                match_type: Some(MatchType::Exact),
                bid: term.bid,
                state: RECORD_STATE_ENABLED.to_string(),
                daily_budget: None,
            });
        } else if term.action.is_negative() {
            records.push(BulkRecord {
                record_type: RecordType::NegativeKeyword,
                campaign: exact_campaign.clone(),
                ad_group: None,
                keyword_text: Some(term.record.search_term.clone()),
                match_type: Some(MatchType::NegativeExact),
                bid: None,
                state: RECORD_STATE_ENABLED.to_string(),
                daily_budget: None,
            });
        }
    }
    records
}

pub fn count_records(records: &[BulkRecord], record_type: RecordType) -> usize {
    records.iter().filter(|r| r.record_type == record_type).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActionLabel, SearchTermRecord};

    fn term(text: &str, action: ActionLabel, bid: Option<f64>) -> ClassifiedTerm {
        ClassifiedTerm {
            record: SearchTermRecord {
                search_term: text.to_string(),
                sku: None,
                spend: 1.0,
                sales: 0.0,
                clicks: 0.0,
                impressions: 0.0,
                orders: 0.0,
                roas: 0.0,
                acos: 0.0,
                cpc: 0.0,
                ctr: 0.0,
                confidence: 0.0,
                profit: None,
                break_even_acos: None,
            },
            action,
            bid,
        }
    }

    #[test]
    fn headers_are_emitted_even_without_terms() {
        let records = build_bulk_records(&[], "Shoes");
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].record_type, RecordType::Campaign);
        assert_eq!(records[0].campaign, "Exact | Shoes");
        assert_eq!(records[0].daily_budget, Some(500.0));
        assert_eq!(records[1].record_type, RecordType::AdGroup);
        assert_eq!(records[1].ad_group.as_deref(), Some("Main"));
        assert_eq!(records[4].campaign, "Broad | Shoes");
    }

    #[test]
    fn keyword_counts_match_labels_and_order_is_preserved() {
        let terms = vec![
            term("b shoes", ActionLabel::Scale, Some(2.2)),
            term("free shoes", ActionLabel::Negative, Some(9.9)),
            term("c shoes", ActionLabel::Harvest, Some(1.0)),
            term("a shoes", ActionLabel::HighPotential, Some(1.1)),
            term("cheap", ActionLabel::Loss, None),
            term("maybe", ActionLabel::Watch, None),
        ];
        let records = build_bulk_records(&terms, "Product");
        assert_eq!(count_records(&records, RecordType::Keyword), 2);
        assert_eq!(count_records(&records, RecordType::NegativeKeyword), 1);

        let tail: Vec<_> = records[6..]
            .iter()
            .map(|r| r.keyword_text.as_deref().unwrap_or(""))
            .collect();
        assert_eq!(tail, vec!["b shoes", "free shoes", "a shoes"]);

        let keyword = &records[6];
        assert_eq!(keyword.campaign, "Exact | Product");
        assert_eq!(keyword.match_type, Some(MatchType::Exact));
        assert_eq!(keyword.bid, Some(2.2));

        let negative = &records[7];
        assert_eq!(negative.match_type, Some(MatchType::NegativeExact));
        assert_eq!(negative.bid, None);
        assert_eq!(negative.ad_group, None);
    }
}
