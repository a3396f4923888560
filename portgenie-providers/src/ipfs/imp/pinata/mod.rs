//! Pinata implementation of [`IpfsPinning`].

use std::sync::Arc;

use zeroize::Zeroizing;

use crate::{
    common_models::ipfs_file::IpfsHash,
    http_client::{FormPart, HttpClient, RequestBuilder},
    ipfs::{
        error::IpfsError,
        imp::pinata::dto::{
            PinJsonRequestDTO, PinListDTO, PinResponseDTO, PinataMetadataDTO, PinataOptionsDTO,
        },
        model::{PinMetadata, PinResponse},
        IpfsPinning,
    },
};

mod dto;

pub const DEFAULT_API_URL: &str = "https://api.pinata.cloud";
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.pinata.cloud/ipfs/";

const CID_VERSION: u8 = 0;

pub enum PinataCredentials {
    ApiKey {
        api_key: String,
        secret_api_key: Zeroizing<String>,
    },
    Jwt(Zeroizing<String>),
}

pub struct Params {
    pub api_url: String,
    pub gateway_url: String,
    /// Requests go out unauthenticated when `None`; gateway reads still work.
    pub credentials: Option<PinataCredentials>,
}

pub struct PinataClient {
    params: Params,
    client: Arc<dyn HttpClient>,
}

impl PinataClient {
    pub fn new(params: Params, client: Arc<dyn HttpClient>) -> Self {
        Self { params, client }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.params.credentials {
            None => request,
            Some(PinataCredentials::ApiKey {
                api_key,
                secret_api_key,
            }) => request
                .header("pinata_api_key", api_key)
                .header("pinata_secret_api_key", secret_api_key),
            Some(PinataCredentials::Jwt(jwt)) => request.bearer_auth(jwt),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.params.api_url.trim_end_matches('/'))
    }

    async fn read_pin_response(request: RequestBuilder) -> Result<PinResponse, IpfsError> {
        let response = request.send().await?;
        if !response.status.is_success() {
            return Err(IpfsError::PinFailed(format!(
                "status {}: {}",
                response.status,
                String::from_utf8_lossy(&response.body)
            )));
        }

        Ok(response.json::<PinResponseDTO>()?.into())
    }
}

#[async_trait::async_trait]
impl IpfsPinning for PinataClient {
    async fn pin_json(
        &self,
        content: &serde_json::Value,
        metadata: PinMetadata,
    ) -> Result<PinResponse, IpfsError> {
        let request = self
            .authorize(self.client.post(&self.api_url("/pinning/pinJSONToIPFS")))
            .json(PinJsonRequestDTO {
                pinata_content: content,
                pinata_metadata: metadata.into(),
                pinata_options: PinataOptionsDTO {
                    cid_version: CID_VERSION,
                },
            })?;

        let response = Self::read_pin_response(request).await?;
        tracing::debug!(hash = %response.ipfs_hash, size = response.pin_size, "pinned JSON");
        Ok(response)
    }

    async fn pin_file(
        &self,
        file_name: &str,
        content_type: &str,
        content: Vec<u8>,
        metadata: PinMetadata,
    ) -> Result<PinResponse, IpfsError> {
        let metadata = serde_json::to_string(&PinataMetadataDTO::from(metadata))?;
        let options = serde_json::to_string(&PinataOptionsDTO {
            cid_version: CID_VERSION,
        })?;

        let request = self
            .authorize(self.client.post(&self.api_url("/pinning/pinFileToIPFS")))
            .multipart(vec![
                FormPart::file("file", file_name, content_type, content),
                FormPart::text("pinataMetadata", metadata),
                FormPart::text("pinataOptions", options),
            ]);

        let response = Self::read_pin_response(request).await?;
        tracing::debug!(hash = %response.ipfs_hash, file_name, "pinned file");
        Ok(response)
    }

    async fn fetch(&self, hash: &IpfsHash) -> Result<Vec<u8>, IpfsError> {
        let response = self.client.get(&self.gateway_url(hash)).send().await?;
        if !response.status.is_success() {
            return Err(IpfsError::NotFound(format!(
                "{hash} (status {})",
                response.status
            )));
        }

        Ok(response.body)
    }

    async fn exists(&self, hash: &IpfsHash) -> Result<bool, IpfsError> {
        let response = self.client.head(&self.gateway_url(hash)).send().await?;

        Ok(response.status.0 == 200)
    }

    async fn pin_metadata(
        &self,
        hash: &IpfsHash,
    ) -> Result<Option<serde_json::Value>, IpfsError> {
        let pin_list: PinListDTO = self
            .authorize(self.client.get(&self.api_url("/data/pinList")))
            .query([("hashContains", hash.as_str())])?
            .send()
            .await?
            .error_for_status()?
            .json()?;

        Ok(pin_list.rows.into_iter().next().and_then(|row| row.metadata))
    }

    fn gateway_url(&self, hash: &IpfsHash) -> String {
        let gateway = &self.params.gateway_url;
        if gateway.ends_with('/') {
            format!("{gateway}{hash}")
        } else {
            format!("{gateway}/{hash}")
        }
    }
}
