pub mod init;
pub mod show;

use tfboot_cloud::{BackendProvider, Cloud, CloudError};
use tfboot_cloud_aws::AwsBackendService;

/// Resolve the provider implementation for the selected cloud.
///
/// gcp/azure parse but have no implementation yet; they fail here instead
/// of silently doing nothing.
pub(crate) async fn provider_for(
    cloud: &str,
    region: &str,
) -> anyhow::Result<Box<dyn BackendProvider>> {
    match cloud.parse::<Cloud>()? {
        Cloud::Aws => Ok(Box::new(AwsBackendService::new(region).await)),
        other => Err(CloudError::UnsupportedCloud(other.to_string()).into()),
    }
}
