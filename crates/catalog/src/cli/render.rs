//! JSON output.
//!
//! Feature values leave the CLI in their flat three-slot form so scripts
//! can read `valueString` / `valueNumber` / `valueBoolean` directly.

use catalogapp::integrity::Cascade;
use catalogapp::model::{FeatureValue, FeatureValueDetail, FeatureValueView};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", to_json(value)?);
    Ok(())
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn value_views(values: &[FeatureValue]) -> Vec<FeatureValueView> {
    values.iter().map(FeatureValue::view).collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView<'a> {
    pub feature_value: FeatureValueView,
    pub resource: &'a catalogapp::model::Resource,
    pub feature: &'a catalogapp::model::Feature,
}

pub fn detail_view(detail: &FeatureValueDetail) -> DetailView<'_> {
    DetailView {
        feature_value: detail.feature_value.view(),
        resource: &detail.resource,
        feature: &detail.feature,
    }
}

/// What a delete removed, as counts plus the ids.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSummary<'a> {
    pub removed: usize,
    #[serde(flatten)]
    pub cascade: &'a Cascade,
}

pub fn delete_summary(cascade: &Cascade) -> DeleteSummary<'_> {
    DeleteSummary {
        removed: cascade.len(),
        cascade,
    }
}
