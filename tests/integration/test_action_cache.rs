use anyhow::Result;
use re_cache_integration_tests::{ServerHarness, TestClientFactory};
use re_cache_server::util::compute_digest;
use re_grpc_proto::build::bazel::remote::execution::v2::{
    ActionResult, Digest, GetActionResultRequest, OutputFile, RequestMetadata,
    UpdateActionResultRequest,
};
use tonic::Code;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .try_init()
        .ok();
}

fn get(instance_name: &str, digest: &Digest) -> GetActionResultRequest {
    GetActionResultRequest {
        instance_name: instance_name.to_string(),
        action_digest: Some(digest.clone()),
        ..Default::default()
    }
}

fn update(instance_name: &str, digest: &Digest, result: &ActionResult) -> UpdateActionResultRequest {
    UpdateActionResultRequest {
        instance_name: instance_name.to_string(),
        action_digest: Some(digest.clone()),
        action_result: Some(result.clone()),
        ..Default::default()
    }
}

fn sample_result() -> ActionResult {
    ActionResult {
        output_files: vec![OutputFile {
            path: "bazel-out/k8-fastbuild/bin/hello".to_string(),
            digest: Some(compute_digest(b"ELF...")),
            is_executable: true,
            ..Default::default()
        }],
        exit_code: 0,
        stdout_raw: b"Compiling hello.c".to_vec(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_miss_then_store_then_hit() -> Result<()> {
    init_tracing();

    let server = ServerHarness::start().await?;
    let mut client = TestClientFactory::create_action_cache_client(&server.url()).await?;

    let d1 = compute_digest(b"action D1");
    let r1 = sample_result();

    let miss = client.get_action_result(get("main", &d1)).await.unwrap_err();
    assert_eq!(miss.code(), Code::NotFound);

    let stored = client.update_action_result(update("main", &d1, &r1)).await?;
    assert_eq!(stored.into_inner(), r1);

    let hit = client.get_action_result(get("main", &d1)).await?;
    assert_eq!(hit.into_inner(), r1);

    assert_eq!(server.requests(), 2);

    server.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn test_unknown_instance_is_not_found() -> Result<()> {
    init_tracing();

    let server = ServerHarness::start().await?;
    let mut client = TestClientFactory::create_action_cache_client(&server.url()).await?;

    let d1 = compute_digest(b"action D1");

    let status = client.get_action_result(get("ghost", &d1)).await.unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
    assert!(status.message().contains("ghost"));

    let status = client
        .update_action_result(update("ghost", &d1, &sample_result()))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    // Routing failures never reach a backend, so they are not counted.
    assert_eq!(server.requests(), 0);

    server.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn test_instances_do_not_share_entries() -> Result<()> {
    init_tracing();

    let server = ServerHarness::start().await?;
    let mut client = TestClientFactory::create_action_cache_client(&server.url()).await?;

    let digest = compute_digest(b"shared action");
    let main_result = sample_result();
    let default_result = ActionResult {
        exit_code: 1,
        ..Default::default()
    };

    client
        .update_action_result(update("main", &digest, &main_result))
        .await?;

    let status = client.get_action_result(get("", &digest)).await.unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    client
        .update_action_result(update("", &digest, &default_result))
        .await?;

    let from_main = client.get_action_result(get("main", &digest)).await?;
    assert_eq!(from_main.into_inner(), main_result);

    let from_default = client.get_action_result(get("", &digest)).await?;
    assert_eq!(from_default.into_inner(), default_result);

    server.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn test_latest_store_wins() -> Result<()> {
    init_tracing();

    let server = ServerHarness::start().await?;
    let mut client = TestClientFactory::create_action_cache_client(&server.url()).await?;

    let digest = compute_digest(b"flaky action");
    let failed = ActionResult {
        exit_code: 2,
        stderr_raw: b"error: flaky".to_vec(),
        ..Default::default()
    };

    client.update_action_result(update("main", &digest, &failed)).await?;
    client
        .update_action_result(update("main", &digest, &sample_result()))
        .await?;

    let hit = client.get_action_result(get("main", &digest)).await?;
    assert_eq!(hit.into_inner(), sample_result());

    server.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn test_read_only_instance_rejects_updates() -> Result<()> {
    init_tracing();

    let server = ServerHarness::start().await?;
    let mut client = TestClientFactory::create_action_cache_client(&server.url()).await?;

    let digest = compute_digest(b"action");

    let status = client
        .update_action_result(update("frozen", &digest, &sample_result()))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::PermissionDenied);

    let status = client.get_action_result(get("frozen", &digest)).await.unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    server.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn test_malformed_digest_is_invalid_argument() -> Result<()> {
    init_tracing();

    let server = ServerHarness::start().await?;
    let mut client = TestClientFactory::create_action_cache_client(&server.url()).await?;

    let malformed = Digest {
        hash: "not a digest".to_string(),
        size_bytes: 4,
    };

    let status = client.get_action_result(get("main", &malformed)).await.unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    let status = client
        .get_action_result(GetActionResultRequest {
            instance_name: "main".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    server.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn test_request_metadata_is_accepted() -> Result<()> {
    init_tracing();

    let server = ServerHarness::start().await?;
    let mut client = TestClientFactory::create_action_cache_client(&server.url()).await?;

    let metadata = RequestMetadata {
        action_id: "4f1c".to_string(),
        tool_invocation_id: "2b7e-invocation".to_string(),
        action_mnemonic: "CppCompile".to_string(),
        ..Default::default()
    };
    let digest = compute_digest(b"traced action");

    client
        .update_action_result(TestClientFactory::with_request_metadata(
            update("main", &digest, &sample_result()),
            &metadata,
        ))
        .await?;

    let hit = client
        .get_action_result(TestClientFactory::with_request_metadata(
            get("main", &digest),
            &metadata,
        ))
        .await?;
    assert_eq!(hit.into_inner(), sample_result());

    server.shutdown().await?;
    Ok(())
}
