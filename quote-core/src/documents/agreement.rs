use crate::calculations::common::{format_money, format_quantity};
use crate::documents::model::{
    Block, Document, DocumentKind, LabeledValue, PriceLine, Section, SignatureBlock,
};
use crate::documents::{DocumentContext, display_date, file_date};
use crate::models::QuoteInputs;

const EXTRAS_INTRO: &str = "d. Unless noted, customer agrees that the following services are \
     separate from this contract and can be quoted upon request:";

/// Builds the service agreement with the computed bill substituted into
/// the cost-of-service clause.
pub fn build_agreement(ctx: &DocumentContext<'_>) -> Document {
    let template = &ctx.settings.agreement_template;
    let company = &ctx.settings.company;
    let client = &ctx.request.client;
    let trading_name = company.trading_name().to_string();
    let date = display_date(ctx.as_of);

    let mut header = vec![
        LabeledValue::new("Customer", &client.name),
        LabeledValue::new("Date", &date),
        LabeledValue::new("Location", &client.address),
        LabeledValue::new("Contractor", &company.name),
    ];
    if !company.dba.trim().is_empty() {
        header.push(LabeledValue::new("DBA", &company.dba));
    }

    let sections = vec![
        Section::numbered("I", "Contractor Responsibility").with(Block::Bullets {
            items: template.contractor_responsibilities.clone(),
        }),
        Section::numbered("II", "Customer Responsibility").with(Block::Bullets {
            items: template.customer_responsibilities.clone(),
        }),
        Section::numbered("III", "Insurance Coverage").with(paragraph(&template.insurance_text)),
        Section::numbered("IV", "Period of Agreement").with(paragraph(format!(
            "Service will commence the {date} and continue. {}",
            template.period_text
        ))),
        Section::numbered("V", "Changes in Specifications or Frequencies")
            .with(paragraph(&template.changes_text)),
        cost_of_service(ctx),
        Section::numbered("VII", "Signatures")
            .with(paragraph(&template.signatures_note))
            .with(Block::Signatures {
                blocks: vec![
                    SignatureBlock {
                        role: "Customer".to_string(),
                        name: client.name.clone(),
                    },
                    SignatureBlock {
                        role: "Contractor".to_string(),
                        name: trading_name.clone(),
                    },
                ],
            }),
    ];

    let closing_notes = [&template.prices_valid_days, &template.copyright_text]
        .into_iter()
        .filter(|note| !note.trim().is_empty())
        .cloned()
        .collect();

    Document {
        kind: DocumentKind::Agreement,
        running_header: Some(format!("{trading_name} – {}", template.title)),
        heading: trading_name,
        subtitle: Some(template.title.clone()),
        contact_line: None,
        header,
        sections,
        closing_notes,
        footer: template.footer_disclaimer.clone(),
        file_name: format!(
            "{}-{}.pdf",
            DocumentKind::Agreement.file_prefix(),
            file_date(ctx.as_of)
        ),
    }
}

fn paragraph(text: impl Into<String>) -> Block {
    Block::Paragraph { text: text.into() }
}

fn cost_of_service(ctx: &DocumentContext<'_>) -> Section {
    let template = &ctx.settings.agreement_template;
    let bill = format_money(ctx.result.total_bill);

    let cost_sentence = match &ctx.request.inputs {
        QuoteInputs::Hourly(staffing) => format!(
            "a. Customer agrees to pay contractor the sum of {bill} per month for service(s) {} time(s) per week, {} staff member(s), {} hour(s) each.",
            format_quantity(staffing.times_per_week),
            format_quantity(staffing.people),
            format_quantity(staffing.hours_per_person),
        ),
        QuoteInputs::Area(area) => format!(
            "a. Customer agrees to pay contractor the sum of {bill} per month for {} service covering {} m².",
            area.tier.label(),
            format_quantity(area.area),
        ),
    };

    let mut section =
        Section::numbered("VI", "Cost of Service and Invoicing").with(paragraph(cost_sentence));

    let terms = ctx.request.payment_terms.trim();
    if !terms.is_empty() {
        section = section.with(paragraph(format!("b. Payment Terms: {terms}")));
    }

    section
        .with(paragraph(format!("c. {}", template.invoice_note)))
        .with(paragraph(EXTRAS_INTRO))
        .with(Block::PriceList {
            items: template
                .extra_services
                .iter()
                .map(|extra| PriceLine {
                    label: extra.label.clone(),
                    price: extra.price.clone(),
                })
                .collect(),
        })
        .with(paragraph(format!("e. {}", template.third_party_note)))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::QuoteCalculator;
    use crate::models::{
        AreaInputs, ClientInfo, QuoteRequest, ServiceTier, Settings, StaffingInputs,
    };

    fn hourly_request() -> QuoteRequest {
        QuoteRequest {
            client: ClientInfo {
                name: "Acme Corp".to_string(),
                address: "9 Elm Road".to_string(),
                ..Default::default()
            },
            inputs: QuoteInputs::Hourly(StaffingInputs::from_text("3", "4", "2")),
            payment_terms: "Net 30".to_string(),
        }
    }

    fn build(
        settings: &Settings,
        request: &QuoteRequest,
    ) -> Document {
        let result = QuoteCalculator::new(&settings.pricing).calculate(&request.inputs);
        build_agreement(&DocumentContext {
            settings,
            request,
            result: &result,
            as_of: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
        })
    }

    fn paragraphs(section: &Section) -> Vec<&str> {
        section
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn sections_are_numbered_one_through_seven() {
        let doc = build(&Settings::default(), &hourly_request());

        let titles: Vec<String> = doc.sections.iter().map(Section::title).collect();
        assert_eq!(
            titles,
            vec![
                "I. Contractor Responsibility",
                "II. Customer Responsibility",
                "III. Insurance Coverage",
                "IV. Period of Agreement",
                "V. Changes in Specifications or Frequencies",
                "VI. Cost of Service and Invoicing",
                "VII. Signatures",
            ]
        );
    }

    #[test]
    fn cost_clause_embeds_bill_and_staffing() {
        let doc = build(&Settings::default(), &hourly_request());

        let cost = doc.section("Cost of Service and Invoicing").unwrap();
        let texts = paragraphs(cost);
        assert_eq!(
            texts[0],
            "a. Customer agrees to pay contractor the sum of €2600.00 per month for service(s) 2 time(s) per week, 3 staff member(s), 4 hour(s) each."
        );
        assert_eq!(texts[1], "b. Payment Terms: Net 30");
        assert!(texts[2].starts_with("c. Prices quoted"));
    }

    #[test]
    fn cost_clause_in_area_mode_names_tier_and_area() {
        let mut request = hourly_request();
        request.inputs = QuoteInputs::Area(AreaInputs {
            area: dec!(75),
            tier: ServiceTier::Deep,
        });
        let doc = build(&Settings::default(), &request);

        let cost = doc.section("Cost of Service and Invoicing").unwrap();
        assert_eq!(
            paragraphs(cost)[0],
            "a. Customer agrees to pay contractor the sum of €450.00 per month for Deep Cleaning service covering 75 m²."
        );
    }

    #[test]
    fn payment_terms_line_is_skipped_when_blank() {
        let mut request = hourly_request();
        request.payment_terms = String::new();
        let doc = build(&Settings::default(), &request);

        let cost = doc.section("Cost of Service and Invoicing").unwrap();
        assert!(paragraphs(cost).iter().all(|t| !t.starts_with("b.")));
    }

    #[test]
    fn extra_services_become_price_list() {
        let doc = build(&Settings::default(), &hourly_request());

        let cost = doc.section("Cost of Service and Invoicing").unwrap();
        assert!(cost.blocks.contains(&Block::Paragraph {
            text: "d. Unless noted, customer agrees that the following services are separate \
                   from this contract and can be quoted upon request:"
                .to_string(),
        }));
        let list = cost
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::PriceList { items } => Some(items),
                _ => None,
            })
            .unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(
            list[0],
            PriceLine {
                label: "Refrigerator inside cleaning".to_string(),
                price: "$35 each".to_string(),
            }
        );
    }

    #[test]
    fn dba_replaces_company_name_in_heading_and_signature() {
        let mut settings = Settings::default();
        settings.company.dba = "Sparkle Co".to_string();
        let doc = build(&settings, &hourly_request());

        assert_eq!(doc.heading, "Sparkle Co");
        assert_eq!(
            doc.running_header.as_deref(),
            Some("Sparkle Co – Service Agreement")
        );
        assert!(doc.header.contains(&LabeledValue::new("DBA", "Sparkle Co")));
        let signatures = doc.section("Signatures").unwrap();
        assert!(signatures.blocks.contains(&Block::Signatures {
            blocks: vec![
                SignatureBlock {
                    role: "Customer".to_string(),
                    name: "Acme Corp".to_string(),
                },
                SignatureBlock {
                    role: "Contractor".to_string(),
                    name: "Sparkle Co".to_string(),
                },
            ],
        }));
    }

    #[test]
    fn period_clause_carries_commencement_date() {
        let doc = build(&Settings::default(), &hourly_request());

        let period = doc.section("Period of Agreement").unwrap();
        assert!(paragraphs(period)[0].starts_with("Service will commence the 10/17/2026 and continue."));
    }

    #[test]
    fn empty_closing_notes_are_dropped() {
        let doc = build(&Settings::default(), &hourly_request());

        assert_eq!(
            doc.closing_notes,
            vec!["Prices quoted are valid for thirty (30) days from date of presentation."]
        );
        assert_eq!(doc.file_name, "service-agreement-10-17-2026.pdf");
    }
}
