use serde::Serialize;

use crate::data_models::{ManifestItem, SiteManifest};
use crate::normalizer::format_date;

/// Display projection of one manifest item.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCardModel {
    pub slug: String,
    pub heading: String,
    /// Thumbnail, first entry of the item's images.
    pub source: String,
    pub last_updated: String,
    pub description: String,
    pub content_link: String,
    pub index_link: String,
    /// Supplemental media link, first entry of the item's videos.
    pub additional_info: String,
}

impl From<&ManifestItem> for ItemCardModel {
    fn from(item: &ManifestItem) -> Self {
        ItemCardModel {
            slug: item.slug.clone(),
            heading: item.title.clone(),
            source: item.thumbnail().to_string(),
            last_updated: format_date(item.updated_at.as_ref()),
            description: item.description.clone(),
            content_link: item.content_link().to_string(),
            index_link: item.location.clone(),
            additional_info: item.supplemental_link().to_string(),
        }
    }
}

pub fn item_cards(manifest: &SiteManifest) -> Vec<ItemCardModel> {
    manifest.items.iter().map(ItemCardModel::from).collect()
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteSummaryModel {
    pub name: String,
    pub description: String,
    pub logo: String,
    pub theme: String,
    pub icon: String,
    pub creation_date: String,
    pub last_updated: String,
    pub item_count: usize,
}

impl SiteSummaryModel {
    pub fn new(manifest: &SiteManifest, default_logo: &str) -> SiteSummaryModel {
        SiteSummaryModel {
            name: manifest.title.clone(),
            description: manifest.description.clone(),
            logo: manifest
                .logo_path
                .clone()
                .unwrap_or_else(|| default_logo.to_string()),
            theme: manifest.theme_color.clone().unwrap_or_default(),
            icon: manifest.icon_ref.clone().unwrap_or_default(),
            creation_date: format_date(manifest.created_at.as_ref()),
            last_updated: format_date(manifest.updated_at.as_ref()),
            item_count: manifest.items.len(),
        }
    }
}
