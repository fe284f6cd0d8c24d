//! Persisted settings with partial updates.
//!
//! The whole [`Settings`] aggregate is stored as one JSON snapshot under
//! [`SETTINGS_KEY`]. Reads are forgiving: a missing or unreadable snapshot
//! yields defaults. Writes are strict: a failed write is reported and the
//! in-memory settings stay as they were.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    AreaRatesPatch, ExtraService, ListEdit, PricingMode, RatePatch, SETTINGS_KEY, ServiceTier,
    Settings, SettingsPatch, TemplateError, TemplateField, TemplateList,
};

use super::repository::{KeyValueStore, StorageError};

#[derive(Debug, Error)]
pub enum SettingsStoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Rebuilds settings from a stored snapshot.
///
/// Absent or unparseable snapshots yield [`Settings::default`]. Otherwise the
/// snapshot is overlaid on the defaults, so keys it lacks keep their
/// default values.
pub fn merge_snapshot(snapshot: Option<&str>) -> Settings {
    let Some(raw) = snapshot else {
        return Settings::default();
    };
    match serde_json::from_str::<SettingsPatch>(raw) {
        Ok(patch) => Settings::from_patch(patch),
        Err(e) => {
            tracing::warn!("stored settings are unreadable, using defaults: {}", e);
            Settings::default()
        }
    }
}

/// Owns the current settings and the store they persist to.
pub struct SettingsStore {
    store: Box<dyn KeyValueStore>,
    current: Settings,
}

impl SettingsStore {
    /// Loads the snapshot from `store`. Never fails: read errors fall back
    /// to defaults.
    pub async fn load(store: Box<dyn KeyValueStore>) -> Self {
        let snapshot = match store.get(SETTINGS_KEY).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("failed to read stored settings, using defaults: {}", e);
                None
            }
        };
        let current = merge_snapshot(snapshot.as_deref());
        Self { store, current }
    }

    pub fn settings(&self) -> &Settings {
        &self.current
    }

    pub async fn update(
        &mut self,
        patch: SettingsPatch,
    ) -> Result<(), SettingsStoreError> {
        self.modify(|settings| {
            settings.apply(patch);
            Ok(())
        })
        .await
    }

    pub async fn update_pricing(
        &mut self,
        patch: RatePatch,
    ) -> Result<(), SettingsStoreError> {
        self.modify(|settings| {
            settings.pricing.apply(patch);
            Ok(())
        })
        .await
    }

    pub async fn update_hourly_rate(
        &mut self,
        rate: Decimal,
    ) -> Result<(), SettingsStoreError> {
        self.update_pricing(RatePatch {
            hourly_rate: Some(rate),
            ..Default::default()
        })
        .await
    }

    /// Changes one tier's rate; the other tiers are kept.
    pub async fn update_area_rate(
        &mut self,
        tier: ServiceTier,
        rate: Decimal,
    ) -> Result<(), SettingsStoreError> {
        let mut rates = AreaRatesPatch::default();
        match tier {
            ServiceTier::Basic => rates.basic = Some(rate),
            ServiceTier::Deep => rates.deep = Some(rate),
            ServiceTier::MoveOut => rates.moveout = Some(rate),
        }
        self.update_pricing(RatePatch {
            area_rates: Some(rates),
            ..Default::default()
        })
        .await
    }

    pub async fn set_mode(
        &mut self,
        mode: PricingMode,
    ) -> Result<(), SettingsStoreError> {
        self.update_pricing(RatePatch {
            mode: Some(mode),
            ..Default::default()
        })
        .await
    }

    /// Applies a positional edit to one of the free-text lists. Entries are
    /// trimmed and must not be blank.
    pub async fn edit_list(
        &mut self,
        list: TemplateList,
        edit: ListEdit<String>,
    ) -> Result<(), SettingsStoreError> {
        let edit = edit.map(|text| text.trim().to_string());
        if edit.item().is_some_and(|text| text.is_empty()) {
            return Err(TemplateError::EmptyEntry.into());
        }
        self.modify(|settings| Ok(edit.apply(settings.list_mut(list))?))
            .await
    }

    /// Applies a positional edit to the extra-services price list. The
    /// label must not be blank; the price is free text.
    pub async fn edit_extra_services(
        &mut self,
        edit: ListEdit<ExtraService>,
    ) -> Result<(), SettingsStoreError> {
        let edit = edit.map(|extra| ExtraService::new(extra.label.trim(), extra.price.trim()));
        if edit.item().is_some_and(|extra| extra.label.is_empty()) {
            return Err(TemplateError::EmptyEntry.into());
        }
        self.modify(|settings| {
            Ok(edit.apply(&mut settings.agreement_template.extra_services)?)
        })
        .await
    }

    /// Replaces one narrative field. Blank text is allowed and clears it.
    pub async fn set_text(
        &mut self,
        field: TemplateField,
        text: String,
    ) -> Result<(), SettingsStoreError> {
        self.modify(|settings| {
            *settings.text_field_mut(field) = text;
            Ok(())
        })
        .await
    }

    /// Applies `change` to a copy, persists it, then commits it in memory.
    async fn modify(
        &mut self,
        change: impl FnOnce(&mut Settings) -> Result<(), SettingsStoreError>,
    ) -> Result<(), SettingsStoreError> {
        let mut candidate = self.current.clone();
        change(&mut candidate)?;
        let snapshot = serde_json::to_string(&candidate)?;
        self.store.set(SETTINGS_KEY, &snapshot).await?;
        tracing::debug!("settings snapshot persisted");
        self.current = candidate;
        Ok(())
    }
}
