use crate::calculations::common::{format_hours, format_money, format_quantity};
use crate::documents::model::{Block, Document, DocumentKind, LabeledValue, Section};
use crate::documents::{DocumentContext, display_date, file_date};
use crate::models::QuoteInputs;

const ESTIMATE_NOTE: &str =
    "This is an estimate. Final pricing may vary based on on-site assessment.";

/// Builds the customer-facing proposal (cleaning specifications plus price).
pub fn build_proposal(ctx: &DocumentContext<'_>) -> Document {
    let template = &ctx.settings.proposal_template;
    let company = &ctx.settings.company;
    let client = &ctx.request.client;
    let contact_line = company.contact_line();

    let header = vec![
        LabeledValue::new("Customer", &client.name),
        LabeledValue::new("Location", &client.address),
        LabeledValue::new("Contractor", &template.contractor_name),
        LabeledValue::new("Date", display_date(ctx.as_of)),
    ];

    let weekly_heading = match &ctx.request.inputs {
        QuoteInputs::Hourly(staffing) => {
            format!("Times Per Week ({})", format_quantity(staffing.times_per_week))
        }
        QuoteInputs::Area(_) => "Weekly".to_string(),
    };

    let sections = vec![
        Section::new(weekly_heading).with(Block::Enumerated {
            items: template.weekly_tasks.clone(),
        }),
        Section::new("Monthly").with(Block::Enumerated {
            items: template.monthly_tasks.clone(),
        }),
        quote_summary(ctx),
    ];

    Document {
        kind: DocumentKind::Proposal,
        heading: template.title.clone(),
        subtitle: Some(company.name.clone()).filter(|s| !s.trim().is_empty()),
        contact_line: Some(contact_line).filter(|s| !s.is_empty()),
        header,
        sections,
        closing_notes: vec![ESTIMATE_NOTE.to_string()],
        running_header: None,
        footer: template.footer_text.clone(),
        file_name: format!(
            "{}-{}.pdf",
            DocumentKind::Proposal.file_prefix(),
            file_date(ctx.as_of)
        ),
    }
}

fn quote_summary(ctx: &DocumentContext<'_>) -> Section {
    let result = ctx.result;
    let (rows, highlight_label) = match &ctx.request.inputs {
        QuoteInputs::Hourly(staffing) => (
            vec![
                LabeledValue::new("Staff Members", format_quantity(staffing.people)),
                LabeledValue::new("Hours per Person", format_quantity(staffing.hours_per_person)),
                LabeledValue::new("Visits per Week", format_quantity(staffing.times_per_week)),
                LabeledValue::new("Hourly Rate", format!("{} per hour", format_money(result.unit_rate))),
                LabeledValue::new(
                    "Total Hours / Week",
                    format!("{} hrs", format_hours(result.total_hours_per_week)),
                ),
                LabeledValue::new("Monthly Hours", format!("{} hrs", format_hours(result.monthly_hours))),
            ],
            "Monthly Estimate",
        ),
        QuoteInputs::Area(area) => (
            vec![
                LabeledValue::new("Service", area.tier.label()),
                LabeledValue::new("Description", area.tier.description()),
                LabeledValue::new("Area", format!("{} m²", format_quantity(area.area))),
                LabeledValue::new("Rate", format!("{} per m²", format_money(result.unit_rate))),
            ],
            "Total",
        ),
    };

    let mut section = Section::new("Quote Summary")
        .with(Block::Facts { rows })
        .with(Block::Highlight {
            label: highlight_label.to_string(),
            value: format_money(result.total_bill),
        });

    let terms = ctx.request.payment_terms.trim();
    if !terms.is_empty() {
        section = section.with(Block::Paragraph {
            text: format!("Terms: {terms}"),
        });
    }
    section
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

    fn request(inputs: QuoteInputs) -> QuoteRequest {
        QuoteRequest {
            client: ClientInfo {
                name: "Acme Corp".to_string(),
                address: "9 Elm Road".to_string(),
                ..Default::default()
            },
            inputs,
            payment_terms: "Net 30".to_string(),
        }
    }

    fn build(
        settings: &Settings,
        request: &QuoteRequest,
    ) -> Document {
        let result = QuoteCalculator::new(&settings.pricing).calculate(&request.inputs);
        build_proposal(&DocumentContext {
            settings,
            request,
            result: &result,
            as_of: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
        })
    }

    #[test]
    fn header_lines_carry_customer_contractor_and_date() {
        let settings = Settings::default();
        let doc = build(
            &settings,
            &request(QuoteInputs::Hourly(StaffingInputs::from_text("3", "4", "2"))),
        );

        assert_eq!(doc.heading, "Cleaning Specifications");
        assert_eq!(
            doc.header,
            vec![
                LabeledValue::new("Customer", "Acme Corp"),
                LabeledValue::new("Location", "9 Elm Road"),
                LabeledValue::new("Contractor", "CleanPro Commercial Cleaning Services"),
                LabeledValue::new("Date", "10/17/2026"),
            ]
        );
        assert_eq!(doc.file_name, "cleaning-specifications-10-17-2026.pdf");
    }

    #[test]
    fn weekly_section_heading_embeds_visit_count() {
        let settings = Settings::default();
        let doc = build(
            &settings,
            &request(QuoteInputs::Hourly(StaffingInputs::from_text("3", "4", "2"))),
        );

        let weekly = doc.section("Times Per Week (2)").expect("weekly section");
        assert_eq!(
            weekly.blocks,
            vec![Block::Enumerated {
                items: settings.proposal_template.weekly_tasks.clone()
            }]
        );
        assert!(doc.section("Monthly").is_some());
    }

    #[test]
    fn hourly_summary_formats_money_and_hours_once() {
        let settings = Settings::default();
        let doc = build(
            &settings,
            &request(QuoteInputs::Hourly(StaffingInputs::from_text("3", "4", "2"))),
        );

        let summary = doc.section("Quote Summary").expect("summary section");
        assert!(summary.blocks.contains(&Block::Highlight {
            label: "Monthly Estimate".to_string(),
            value: "€2600.00".to_string(),
        }));
        let Block::Facts { rows } = &summary.blocks[0] else {
            panic!("expected facts block first");
        };
        assert!(rows.contains(&LabeledValue::new("Total Hours / Week", "24.0 hrs")));
        assert!(rows.contains(&LabeledValue::new("Monthly Hours", "104.0 hrs")));
        assert!(summary.blocks.contains(&Block::Paragraph {
            text: "Terms: Net 30".to_string()
        }));
    }

    #[test]
    fn area_summary_names_tier_and_rate() {
        let settings = Settings::default();
        let doc = build(
            &settings,
            &request(QuoteInputs::Area(AreaInputs {
                area: dec!(75),
                tier: ServiceTier::Deep,
            })),
        );

        assert!(doc.section("Weekly").is_some());
        let summary = doc.section("Quote Summary").expect("summary section");
        let Block::Facts { rows } = &summary.blocks[0] else {
            panic!("expected facts block first");
        };
        assert!(rows.contains(&LabeledValue::new("Area", "75 m²")));
        assert!(rows.contains(&LabeledValue::new("Rate", "€6.00 per m²")));
        assert!(summary.blocks.contains(&Block::Highlight {
            label: "Total".to_string(),
            value: "€450.00".to_string(),
        }));
    }

    #[test]
    fn blank_payment_terms_are_omitted() {
        let settings = Settings::default();
        let mut req = request(QuoteInputs::Hourly(StaffingInputs::from_text("1", "1", "1")));
        req.payment_terms = "  ".to_string();
        let doc = build(&settings, &req);

        let summary = doc.section("Quote Summary").expect("summary section");
        assert!(
            !summary
                .blocks
                .iter()
                .any(|b| matches!(b, Block::Paragraph { .. }))
        );
    }

    #[test]
    fn identical_inputs_build_identical_documents() {
        let settings = Settings::default();
        let req = request(QuoteInputs::Hourly(StaffingInputs::from_text("2", "3", "5")));

        assert_eq!(build(&settings, &req), build(&settings, &req));
    }
}
