//! Builds NFT metadata for an entity and pins it to IPFS.

use std::collections::BTreeMap;
use std::sync::Arc;

use portgenie_providers::common_models::{credential::CredentialType, ipfs_file::NewIpfsFile};
use portgenie_providers::credential_storage::IpfsFileRepository;
use portgenie_providers::ipfs::{model::PinMetadata, IpfsPinning};
use serde_json::{Map, Value};
use time::{format_description::well_known::Rfc3339, macros::format_description};
use time::{Date, OffsetDateTime};

use crate::{
    model::{
        CertificateData, CredentialMetadata, EntityData, MetadataAttribute, PackagedMetadata,
        PortfolioData, ResumeData,
    },
    service::error::MetadataServiceError,
};

const PORTFOLIO_BASE_URL: &str = "https://portgenie.com/portfolio";
const METADATA_FILE_TYPE: &str = "application/json";

pub struct MetadataService {
    ipfs: Arc<dyn IpfsPinning>,
    ipfs_files: Arc<dyn IpfsFileRepository>,
}

impl MetadataService {
    pub fn new(ipfs: Arc<dyn IpfsPinning>, ipfs_files: Arc<dyn IpfsFileRepository>) -> Self {
        Self { ipfs, ipfs_files }
    }

    /// Builds the metadata document and pins it.
    ///
    /// Every call pins again; identical documents resolve to the same hash.
    pub async fn package(
        &self,
        user_id: &str,
        entity_id: &str,
        entity_data: &EntityData,
    ) -> Result<PackagedMetadata, MetadataServiceError> {
        let metadata = build_metadata(entity_data)?;
        let credential_type = entity_data.credential_type();
        let tags = metadata_tags(credential_type);
        let pin_name = format!("{credential_type}-{entity_id}-metadata.json");
        let description = format!("Metadata for {credential_type} {}", entity_data.title());

        let pin_metadata = PinMetadata {
            name: pin_name.clone(),
            key_values: BTreeMap::from([
                ("userId".to_string(), user_id.to_string()),
                ("description".to_string(), description.clone()),
                ("relatedEntityType".to_string(), credential_type.to_string()),
                ("relatedEntityId".to_string(), entity_id.to_string()),
                ("tags".to_string(), tags.join(",")),
            ]),
        };

        let document = serde_json::to_value(&metadata)?;
        let pinned = self
            .ipfs
            .pin_json(&document, pin_metadata)
            .await
            .map_err(|e| {
                tracing::error!(entity_id, "metadata pinning failed: {e}");
                e
            })?;
        let ipfs_hash = pinned.ipfs_hash;
        let gateway_url = self.ipfs.gateway_url(&ipfs_hash);
        tracing::debug!(%ipfs_hash, duplicate = pinned.is_duplicate, "metadata pinned");

        let ipfs_file = match self
            .ipfs_files
            .create(NewIpfsFile {
                user_id: user_id.to_string(),
                ipfs_hash: ipfs_hash.clone(),
                ipfs_url: gateway_url.clone(),
                name: pin_name,
                description: Some(description),
                file_type: METADATA_FILE_TYPE.to_string(),
                size: pinned.pin_size,
                related_entity_type: Some(credential_type),
                related_entity_id: Some(entity_id.to_string()),
                tags,
            })
            .await
        {
            Ok(file) => Some(file),
            Err(e) => {
                // the content is pinned and addressable regardless
                tracing::warn!(%ipfs_hash, "failed to record pinned file: {e}");
                None
            }
        };

        Ok(PackagedMetadata {
            metadata,
            metadata_uri: ipfs_hash.to_uri(),
            ipfs_hash,
            gateway_url,
            ipfs_file,
        })
    }
}

/// Maps entity fields to the common metadata shape.
pub fn build_metadata(entity_data: &EntityData) -> Result<CredentialMetadata, MetadataServiceError> {
    match entity_data {
        EntityData::Certificate(data) => certificate_metadata(data),
        EntityData::Resume(data) => resume_metadata(data),
        EntityData::Portfolio(data) => portfolio_metadata(data),
    }
}

fn certificate_metadata(data: &CertificateData) -> Result<CredentialMetadata, MetadataServiceError> {
    let mut attributes = vec![MetadataAttribute::new("Issuer", data.issuer.as_str())];
    attributes.extend(date_attributes("Issue Date", &data.issue_date)?);
    attributes.push(MetadataAttribute::new(
        "Credential ID",
        data.credential_id.as_str(),
    ));

    Ok(CredentialMetadata {
        name: data.title.clone(),
        description: data.description.clone(),
        image: data.thumbnail_url.clone(),
        external_url: data.credential_url.clone(),
        attributes,
        extra: Map::new(),
    })
}

fn resume_metadata(data: &ResumeData) -> Result<CredentialMetadata, MetadataServiceError> {
    let mut attributes = vec![MetadataAttribute::new("Template", data.template.as_str())];
    attributes.extend(date_attributes("Created Date", &data.created_at)?);

    let mut extra = Map::new();
    extra.insert("resume_content".to_string(), data.content.clone());

    Ok(CredentialMetadata {
        name: format!("{} - Resume", data.title),
        description: format!("Professional resume of {}", data.title),
        image: None,
        external_url: None,
        attributes,
        extra,
    })
}

fn portfolio_metadata(data: &PortfolioData) -> Result<CredentialMetadata, MetadataServiceError> {
    let mut attributes = vec![
        MetadataAttribute::new("Theme", data.theme.as_str()),
        MetadataAttribute::new("Color Scheme", data.color_scheme.as_str()),
    ];
    attributes.extend(date_attributes("Created Date", &data.created_at)?);

    let mut extra = Map::new();
    if let Some(slug) = &data.slug {
        extra.insert(
            "portfolio_url".to_string(),
            Value::String(format!("{PORTFOLIO_BASE_URL}/{slug}")),
        );
    }
    extra.insert("theme".to_string(), Value::String(data.theme.clone()));
    extra.insert(
        "color_scheme".to_string(),
        Value::String(data.color_scheme.clone()),
    );

    Ok(CredentialMetadata {
        name: data.title.clone(),
        description: data.description.clone(),
        image: None,
        external_url: None,
        attributes,
        extra,
    })
}

/// The human readable date followed by its `display_type: date` twin.
fn date_attributes(
    trait_type: &str,
    value: &str,
) -> Result<[MetadataAttribute; 2], MetadataServiceError> {
    Ok([
        MetadataAttribute::new(trait_type, value),
        MetadataAttribute::date(trait_type, epoch_seconds(value)?),
    ])
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (UTC midnight).
fn epoch_seconds(value: &str) -> Result<i64, MetadataServiceError> {
    if let Ok(timestamp) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(timestamp.unix_timestamp());
    }

    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map(|date| date.midnight().assume_utc().unix_timestamp())
        .map_err(|_| MetadataServiceError::InvalidDate(value.to_string()))
}

fn metadata_tags(credential_type: CredentialType) -> Vec<String> {
    vec![
        credential_type.to_string(),
        "nft".to_string(),
        "metadata".to_string(),
    ]
}
