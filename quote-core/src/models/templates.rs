//! Editable document template text.
//!
//! Lists are ordered: array order is display order. They are edited by
//! position through [`ListEdit`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when editing a template list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("index {index} is out of range for a list of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("template entries must not be blank")]
    EmptyEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProposalTemplate {
    pub title: String,
    pub contractor_name: String,
    pub weekly_tasks: Vec<String>,
    pub monthly_tasks: Vec<String>,
    pub footer_text: String,
}

impl Default for ProposalTemplate {
    fn default() -> Self {
        Self {
            title: "Cleaning Specifications".to_string(),
            contractor_name: "CleanPro Commercial Cleaning Services".to_string(),
            weekly_tasks: to_strings(&[
                "Vacuum all carpet and floor mats.",
                "Dust, mop and damp mop all tile floors.",
                "Empty all trash and take to dumpster.",
                "Clean entry door glass.",
                "Spot clean glass and mirrors throughout office.",
                "Clean and sanitize restrooms.",
                "Refill toilet paper, soap and towel dispensers as needed from client's supply.",
                "Clean kitchenette, sink and surrounding countertop, and water fountain.",
                "Dust uncovered areas of all desks, file cabinets, bookcases, counters and other furniture.",
                "Dust windowsills, phones and computers.",
                "Remove cobwebs from corners of ceilings and baseboards.",
                "Spot clean new carpet spots (usually on request).",
            ]),
            monthly_tasks: to_strings(&[
                "Dust baseboards (wash as needed).",
                "Spot clean doors and walls.",
                "Dust overhead vents and blinds.",
            ]),
            footer_text: "Each CleanPro location is independently owned and operated.".to_string(),
        }
    }
}

/// One line of the extra-services price list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraService {
    pub label: String,
    /// Free text, e.g. "$35 each" or "Quote upon request".
    pub price: String,
}

impl ExtraService {
    pub fn new(
        label: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            price: price.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgreementTemplate {
    pub title: String,
    pub contractor_responsibilities: Vec<String>,
    pub customer_responsibilities: Vec<String>,
    pub insurance_text: String,
    pub period_text: String,
    pub changes_text: String,
    pub extra_services: Vec<ExtraService>,
    pub invoice_note: String,
    pub third_party_note: String,
    pub signatures_note: String,
    pub prices_valid_days: String,
    pub copyright_text: String,
    pub footer_disclaimer: String,
}

impl Default for AgreementTemplate {
    fn default() -> Self {
        Self {
            title: "Service Agreement".to_string(),
            contractor_responsibilities: to_strings(&[
                "Contractor agrees to provide all services as described below.",
                "Contractor agrees to provide all labor, equipment and cleaning supplies.",
                "Contractor agrees to provide service as scheduled after regular business hours unless otherwise mutually agreed.",
            ]),
            customer_responsibilities: to_strings(&[
                "Customer agrees to provide adequate and secure storage facilities for contractor's equipment and supplies.",
                "Customer agrees to provide adequate water and electrical facilities for use of contractor.",
                "Customer agrees to provide access cards/keys for contractor's use.",
                "Customer to furnish all trash bags, paper products and soap. If client requests, contractor can provide and deliver these items for a competitive price.",
                "Customer agrees to provide adequate trash disposal facilities.",
                "Customer agrees that contractor is not responsible for cleaning any blood or human fluid spills and that these spills will be cleaned upon occurrence by the customer.",
                "Customer agrees not to employ in a similar position any contractor employee assigned to service customer's facilities during the life of this agreement and for a period of three months following termination of this agreement.",
                "Customer understands Contractor's performance and provision of requested services are subject to the availability of products, tools and labor.",
            ]),
            insurance_text: "Contractor agrees to keep insurance coverage(s) in force during the term of the agreement.".to_string(),
            period_text: "Service will continue (with the price protected) for one year or until canceled by thirty (30) days' written notice by either party.".to_string(),
            changes_text: "Customer and contractor agree that specifications, frequencies or work assignments may be altered at any time by written notice. Contractor and customer will negotiate the cost of service changes.".to_string(),
            extra_services: vec![
                ExtraService::new("Refrigerator inside cleaning", "$35 each"),
                ExtraService::new("Microwave/Toaster Oven inside cleaning", "$35 each"),
                ExtraService::new("Extra tasks or special cleaning not on specifications", "$25 per hour"),
                ExtraService::new("Window washing", "Quote upon request"),
            ],
            invoice_note: "Prices quoted do not include applicable sales tax and are subject to change. Customer understands pricing is subject to change if costs of products, tools or labor increase.".to_string(),
            third_party_note: "Contractor does not assume costs relating to customer payment and invoice processing. If the customer uses a third-party invoicing portal or payment disbursement company and said services incur an expense or fee, said costs will be reverted to the customer and added to the quoted price.".to_string(),
            signatures_note: "THE UNDERSIGNED HAVE READ, UNDERSTAND and ACCEPT THIS AGREEMENT, and by signing this Agreement, all parties agree to all of the aforementioned terms, conditions and policies.".to_string(),
            prices_valid_days: "Prices quoted are valid for thirty (30) days from date of presentation.".to_string(),
            copyright_text: String::new(),
            footer_disclaimer: "Each CleanPro location is independently owned and operated.".to_string(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The editable free-text lists across both templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateList {
    WeeklyTasks,
    MonthlyTasks,
    ContractorResponsibilities,
    CustomerResponsibilities,
}

impl TemplateList {
    pub const ALL: [TemplateList; 4] = [
        Self::WeeklyTasks,
        Self::MonthlyTasks,
        Self::ContractorResponsibilities,
        Self::CustomerResponsibilities,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeeklyTasks => "weekly_tasks",
            Self::MonthlyTasks => "monthly_tasks",
            Self::ContractorResponsibilities => "contractor_responsibilities",
            Self::CustomerResponsibilities => "customer_responsibilities",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "weekly_tasks" => Some(Self::WeeklyTasks),
            "monthly_tasks" => Some(Self::MonthlyTasks),
            "contractor_responsibilities" => Some(Self::ContractorResponsibilities),
            "customer_responsibilities" => Some(Self::CustomerResponsibilities),
            _ => None,
        }
    }
}

/// Single-valued narrative fields across both templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateField {
    ProposalTitle,
    ContractorName,
    ProposalFooter,
    AgreementTitle,
    InsuranceText,
    PeriodText,
    ChangesText,
    InvoiceNote,
    ThirdPartyNote,
    SignaturesNote,
    PricesValidDays,
    CopyrightText,
    FooterDisclaimer,
}

impl TemplateField {
    pub const ALL: [TemplateField; 13] = [
        Self::ProposalTitle,
        Self::ContractorName,
        Self::ProposalFooter,
        Self::AgreementTitle,
        Self::InsuranceText,
        Self::PeriodText,
        Self::ChangesText,
        Self::InvoiceNote,
        Self::ThirdPartyNote,
        Self::SignaturesNote,
        Self::PricesValidDays,
        Self::CopyrightText,
        Self::FooterDisclaimer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProposalTitle => "proposal_title",
            Self::ContractorName => "contractor_name",
            Self::ProposalFooter => "proposal_footer",
            Self::AgreementTitle => "agreement_title",
            Self::InsuranceText => "insurance_text",
            Self::PeriodText => "period_text",
            Self::ChangesText => "changes_text",
            Self::InvoiceNote => "invoice_note",
            Self::ThirdPartyNote => "third_party_note",
            Self::SignaturesNote => "signatures_note",
            Self::PricesValidDays => "prices_valid_days",
            Self::CopyrightText => "copyright_text",
            Self::FooterDisclaimer => "footer_disclaimer",
        }
    }
}

/// A positional edit on an ordered template list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEdit<T> {
    Push(T),
    Insert { index: usize, item: T },
    Update { index: usize, item: T },
    Remove(usize),
}

impl<T> ListEdit<T> {
    /// Applies the edit in place. `Insert` accepts `index == len` (append).
    pub fn apply(
        self,
        items: &mut Vec<T>,
    ) -> Result<(), TemplateError> {
        let len = items.len();
        match self {
            ListEdit::Push(item) => items.push(item),
            ListEdit::Insert { index, item } => {
                if index > len {
                    return Err(TemplateError::IndexOutOfRange { index, len });
                }
                items.insert(index, item);
            }
            ListEdit::Update { index, item } => {
                let slot = items
                    .get_mut(index)
                    .ok_or(TemplateError::IndexOutOfRange { index, len })?;
                *slot = item;
            }
            ListEdit::Remove(index) => {
                if index >= len {
                    return Err(TemplateError::IndexOutOfRange { index, len });
                }
                items.remove(index);
            }
        }
        Ok(())
    }

    pub fn item(&self) -> Option<&T> {
        match self {
            ListEdit::Push(item)
            | ListEdit::Insert { item, .. }
            | ListEdit::Update { item, .. } => Some(item),
            ListEdit::Remove(_) => None,
        }
    }

    /// Maps the carried item, keeping the position.
    pub fn map<U>(
        self,
        f: impl FnOnce(T) -> U,
    ) -> ListEdit<U> {
        match self {
            ListEdit::Push(item) => ListEdit::Push(f(item)),
            ListEdit::Insert { index, item } => ListEdit::Insert {
                index,
                item: f(item),
            },
            ListEdit::Update { index, item } => ListEdit::Update {
                index,
                item: f(item),
            },
            ListEdit::Remove(index) => ListEdit::Remove(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> Vec<String> {
        to_strings(&["a", "b", "c"])
    }

    #[test]
    fn push_appends_to_end() {
        let mut items = sample();
        ListEdit::Push("d".to_string()).apply(&mut items).unwrap();

        assert_eq!(items, to_strings(&["a", "b", "c", "d"]));
    }

    #[test]
    fn insert_at_position_shifts_following_entries() {
        let mut items = sample();
        ListEdit::Insert {
            index: 1,
            item: "x".to_string(),
        }
        .apply(&mut items)
        .unwrap();

        assert_eq!(items, to_strings(&["a", "x", "b", "c"]));
    }

    #[test]
    fn insert_at_len_appends() {
        let mut items = sample();
        ListEdit::Insert {
            index: 3,
            item: "z".to_string(),
        }
        .apply(&mut items)
        .unwrap();

        assert_eq!(items.last().map(String::as_str), Some("z"));
    }

    #[test]
    fn update_replaces_in_place() {
        let mut items = sample();
        ListEdit::Update {
            index: 2,
            item: "C".to_string(),
        }
        .apply(&mut items)
        .unwrap();

        assert_eq!(items, to_strings(&["a", "b", "C"]));
    }

    #[test]
    fn remove_drops_entry() {
        let mut items = sample();
        ListEdit::Remove(0).apply(&mut items).unwrap();

        assert_eq!(items, to_strings(&["b", "c"]));
    }

    #[test]
    fn out_of_range_edits_are_rejected_without_change() {
        let mut items = sample();

        let update = ListEdit::Update {
            index: 3,
            item: "nope".to_string(),
        }
        .apply(&mut items);
        let remove = ListEdit::<String>::Remove(7).apply(&mut items);
        let insert = ListEdit::Insert {
            index: 4,
            item: "nope".to_string(),
        }
        .apply(&mut items);

        assert_eq!(update, Err(TemplateError::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(remove, Err(TemplateError::IndexOutOfRange { index: 7, len: 3 }));
        assert_eq!(insert, Err(TemplateError::IndexOutOfRange { index: 4, len: 3 }));
        assert_eq!(items, sample());
    }

    #[test]
    fn template_list_names_round_trip() {
        for list in TemplateList::ALL {
            assert_eq!(TemplateList::parse(list.as_str()), Some(list));
        }
        assert_eq!(TemplateList::parse("yearly_tasks"), None);
    }

    #[test]
    fn missing_template_keys_fall_back_to_defaults() {
        let template: ProposalTemplate =
            serde_json::from_str(r#"{ "title": "Custom Title" }"#).unwrap();

        assert_eq!(template.title, "Custom Title");
        assert_eq!(template.weekly_tasks, ProposalTemplate::default().weekly_tasks);
        assert_eq!(template.footer_text, ProposalTemplate::default().footer_text);
    }
}
