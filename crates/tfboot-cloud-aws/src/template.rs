//! CloudFormation template for the state bucket stack
//!
//! The template body is constant: the caller-chosen bucket name prefix
//! travels as a submission-time parameter (`BucketPrefix`) rather than being
//! spliced into the document, so an arbitrary prefix can never corrupt the
//! template and the same body serves every stack. CloudFormation appends a
//! slice of the stack id to the prefix, which keeps the bucket name globally
//! unique.

use crate::client::StackRequest;
use std::collections::HashMap;
use tfboot_cloud::{CloudError, Result};

/// Fixed name of the bootstrap stack.
pub const STACK_NAME: &str = "tfboot-backend";

/// Tag marking a stack as managed by tfboot. Sole idempotency signal.
pub const BOOTSTRAP_TAG_KEY: &str = "bootstrap";
pub const BOOTSTRAP_TAG_VALUE: &str = "true";

/// Template parameter carrying the bucket name prefix.
pub const BUCKET_PREFIX_PARAMETER: &str = "BucketPrefix";

/// Stack output exposing the generated bucket name.
pub const BUCKET_NAME_OUTPUT: &str = "BucketName";

const TEMPLATE_BODY: &str = r#"AWSTemplateFormatVersion: '2010-09-09'
Description: S3 bucket with versioning enabled, used as a Terraform state backend

Parameters:
  BucketPrefix:
    Type: String
    Description: Human-readable prefix for the bucket name

Resources:
  StateBucket:
    Type: 'AWS::S3::Bucket'
    Properties:
      BucketName: !Join
        - "-"
        - - !Ref BucketPrefix
          - !Select
            - 0
            - !Split
              - "-"
              - !Select
                - 2
                - !Split
                  - "/"
                  - !Ref "AWS::StackId"
      VersioningConfiguration:
        Status: Enabled

Outputs:
  BucketName:
    Description: Name of the state bucket
    Value: !Ref StateBucket
"#;

/// Build the create-stack request for the given bucket name prefix.
///
/// Pure function of the prefix: template body, bootstrap tag and the
/// `BucketPrefix` parameter, addressed to the fixed stack name.
pub fn render(prefix: &str) -> Result<StackRequest> {
    if prefix.is_empty() {
        return Err(CloudError::InvalidConfig(
            "bucket name prefix must not be empty".to_string(),
        ));
    }

    Ok(StackRequest {
        stack_name: STACK_NAME.to_string(),
        template_body: TEMPLATE_BODY.to_string(),
        tags: HashMap::from([(
            BOOTSTRAP_TAG_KEY.to_string(),
            BOOTSTRAP_TAG_VALUE.to_string(),
        )]),
        parameters: HashMap::from([(BUCKET_PREFIX_PARAMETER.to_string(), prefix.to_string())]),
    })
}
