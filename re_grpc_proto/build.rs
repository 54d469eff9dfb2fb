/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::io;

// The generated bindings are checked in under src/ so that building the
// workspace does not need protoc. Set RE_GRPC_PROTO_REGENERATE=1 after editing
// the .proto files to rewrite them.
const REGENERATE_ENV: &str = "RE_GRPC_PROTO_REGENERATE";

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-env-changed={REGENERATE_ENV}");

    if std::env::var_os(REGENERATE_ENV).is_none() {
        return Ok(());
    }

    let proto_files = &["proto/build/bazel/remote/execution/v2/remote_execution.proto"];

    for file in proto_files {
        println!("cargo:rerun-if-changed={file}");
    }

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .out_dir("src/")
        .compile_protos(proto_files, &["proto/"])?;
    Ok(())
}
