#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use cnyre_core::Compression;
use cnyre_test::{sample_properties, TestEnvironment};
use std::path::PathBuf;

/// `cnyre` binary isolated from the user's home directory
pub fn cnyre_cmd(env: &TestEnvironment) -> Command {
    let mut cmd = Command::cargo_bin("cnyre").expect("cnyre binary should be built");
    cmd.env("CNYRE_HOME", env.root())
        .env_remove("CNYRE_LOG")
        .env_remove("CNYRE_CONFIG");
    cmd
}

/// Environment with the sample snapshot published and a config pointing at it
pub fn published_environment(compression: Compression) -> Result<(TestEnvironment, PathBuf)> {
    let env = TestEnvironment::new()?;
    env.publish_snapshot(&sample_properties(), "2024-06-01", compression)?;
    let config_path = env.write_config(&env.config(compression))?;
    Ok((env, config_path))
}
