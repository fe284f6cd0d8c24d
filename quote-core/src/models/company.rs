use serde::{Deserialize, Serialize};

/// Identity of the cleaning company issuing the documents.
///
/// Every field is free-form text and may be empty; nothing here is
/// validated for format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    /// "Doing business as" name. Preferred over `name` in agreement headings
    /// when set.
    pub dba: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub logo_url: String,
    /// Default payment terms offered on new quotes.
    pub billing_terms: String,
}

impl CompanyProfile {
    /// The name printed on headings and signature blocks.
    pub fn trading_name(&self) -> &str {
        if self.dba.trim().is_empty() {
            &self.name
        } else {
            &self.dba
        }
    }

    /// Address, phone and email joined with " · ", skipping empty parts.
    pub fn contact_line(&self) -> String {
        [&self.address, &self.phone, &self.email]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: "CleanPro Services".to_string(),
            dba: String::new(),
            address: "123 Main Street, City".to_string(),
            phone: "+1 234 567 890".to_string(),
            email: "info@cleanpro.com".to_string(),
            logo_url: String::new(),
            billing_terms: "Due upon receipt".to_string(),
        }
    }
}

/// The customer a quote is prepared for (step 1 of the calculator wizard).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl ClientInfo {
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn trading_name_prefers_dba() {
        let mut company = CompanyProfile::default();
        assert_eq!(company.trading_name(), "CleanPro Services");

        company.dba = "Sparkle Offices".to_string();
        assert_eq!(company.trading_name(), "Sparkle Offices");
    }

    #[test]
    fn contact_line_skips_blank_parts() {
        let company = CompanyProfile {
            address: "1 High St".to_string(),
            phone: "  ".to_string(),
            email: "hi@example.com".to_string(),
            ..Default::default()
        };

        assert_eq!(company.contact_line(), "1 High St · hi@example.com");
    }

    #[test]
    fn client_name_must_not_be_blank() {
        let mut client = ClientInfo::default();
        assert!(!client.has_name());

        client.name = "   ".to_string();
        assert!(!client.has_name());

        client.name = "Acme Corp".to_string();
        assert!(client.has_name());
    }
}
