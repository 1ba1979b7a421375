//! Pure composition: build calldata via the ABI codec, dispatch it
//! through the host client's read or write path, decode the return
//! data, and hand back typed domain values.

use std::str::FromStr;

use tracing::instrument;
use worker_abi_codec::{decode_return, signatures, AbiValue, DecodedReturn};
use worker_host_client::HostClient;
use worker_models::{Address, AnalysisRequest, RequestStatus, Uint256};

use crate::errors::ContractClientError;

pub struct ContractClient {
    host: HostClient,
    contract_address: Address,
}

impl ContractClient {
    pub fn new(host: HostClient, contract_address: Address) -> Self {
        Self {
            host,
            contract_address,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_pending_requests(&self) -> Result<Vec<Uint256>, ContractClientError> {
        let calldata = worker_abi_codec::encode_call(signatures::GET_PENDING_REQUESTS, &[])?;
        let raw = self.host.eth_call(self.contract_address, &calldata).await?;
        match decode_return(signatures::GET_PENDING_REQUESTS, &raw)? {
            DecodedReturn::PendingRequests(ids) => Ok(ids),
            _ => Err(ContractClientError::UnexpectedShape),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_analysis_request(
        &self,
        id: Uint256,
    ) -> Result<AnalysisRequest, ContractClientError> {
        let calldata =
            worker_abi_codec::encode_call(signatures::GET_ANALYSIS_REQUEST, &[AbiValue::Uint256(id)])?;
        let raw = self.host.eth_call(self.contract_address, &calldata).await?;
        match decode_return(signatures::GET_ANALYSIS_REQUEST, &raw)? {
            DecodedReturn::AnalysisRequest {
                requester,
                user1,
                user2,
                status,
                result,
                request_time,
                completion_time,
            } => {
                let status = RequestStatus::from_str(&status)
                    .map_err(|_| ContractClientError::UnexpectedShape)?;
                let request_time = request_time
                    .to_u64()
                    .map_err(|_| ContractClientError::UnexpectedShape)?;
                let completion_time = completion_time
                    .to_u64()
                    .map_err(|_| ContractClientError::UnexpectedShape)?;
                Ok(AnalysisRequest {
                    id,
                    requester,
                    user1,
                    user2,
                    status,
                    result,
                    request_time,
                    completion_time,
                })
            }
            _ => Err(ContractClientError::UnexpectedShape),
        }
    }

    /// TEE-identity-only call; the contract enforces that restriction.
    #[instrument(skip(self))]
    pub async fn get_snp_data_for_analysis(
        &self,
        id: Uint256,
    ) -> Result<(String, String), ContractClientError> {
        let calldata = worker_abi_codec::encode_call(
            signatures::GET_SNP_DATA_FOR_ANALYSIS,
            &[AbiValue::Uint256(id)],
        )?;
        let raw = self.host.eth_call(self.contract_address, &calldata).await?;
        match decode_return(signatures::GET_SNP_DATA_FOR_ANALYSIS, &raw)? {
            DecodedReturn::SnpData { user1_snp, user2_snp } => Ok((user1_snp, user2_snp)),
            _ => Err(ContractClientError::UnexpectedShape),
        }
    }

    /// `confidence_pct` MUST already be rounded into `[0, 100]`.
    #[instrument(skip(self, result_json))]
    pub async fn submit_analysis_result(
        &self,
        id: Uint256,
        result_json: String,
        confidence_pct: u8,
        relationship: String,
    ) -> Result<String, ContractClientError> {
        let args = [
            AbiValue::Uint256(id),
            AbiValue::Str(result_json),
            AbiValue::Uint256(Uint256::from_u64(confidence_pct as u64)),
            AbiValue::Str(relationship),
        ];
        let calldata = worker_abi_codec::encode_call(signatures::SUBMIT_ANALYSIS_RESULT, &args)?;
        self.host
            .sign_submit(self.contract_address, &calldata, DEFAULT_GAS)
            .await
            .map_err(map_rejection)
    }

    #[instrument(skip(self, reason))]
    pub async fn mark_analysis_failed(
        &self,
        id: Uint256,
        reason: String,
    ) -> Result<String, ContractClientError> {
        let args = [AbiValue::Uint256(id), AbiValue::Str(reason)];
        let calldata = worker_abi_codec::encode_call(signatures::MARK_ANALYSIS_FAILED, &args)?;
        self.host
            .sign_submit(self.contract_address, &calldata, DEFAULT_GAS)
            .await
            .map_err(map_rejection)
    }
}

const DEFAULT_GAS: u64 = 500_000;

fn map_rejection(err: worker_host_client::HostClientError) -> ContractClientError {
    let mapped = ContractClientError::Host(err);
    if mapped.is_state_rejection() {
        if let ContractClientError::Host(worker_host_client::HostClientError::HostError {
            message,
            ..
        }) = mapped
        {
            return ContractClientError::StateRejection(message);
        }
    }
    mapped
}
