use super::helpers::{self, User};
use anyhow::{anyhow, Result};
use blintz_codec::archive::{deserialize_solo, serialize_solo};
use blintz_codec::obj::Obj;
use blintz_codec::registry::Registry;
use blintz_types::error::{Error, RegistryError};

fn sample_file() -> Result<Vec<u8>> {
    let obj = Obj::Inst(Box::new(User {
        name: String::from("Ada"),
        age: 36,
        tags: vec![String::from("x"), String::from("y")],
    }));
    let bytes = serialize_solo(&obj, &helpers::user_schema())?;
    Ok(bytes)
}

pub fn every_truncation_fails() -> Result<()> {
    let bytes = sample_file()?;

    for len in 0..bytes.len() {
        let res = deserialize_solo(&bytes[..len], &helpers::registry());
        match res {
            Err(Error::Decode(_)) => {}
            Err(other) => {
                return Err(anyhow!(
                    "prefix of {} bytes failed outside the decode taxonomy: {}",
                    len,
                    other
                ))
            }
            Ok(_) => return Err(anyhow!("prefix of {} bytes decoded", len)),
        }
    }

    Ok(())
}

pub fn unassigned_tag_fails() -> Result<()> {
    let mut bytes = sample_file()?;

    bytes[0] = 200;
    let res = deserialize_solo(&bytes, &helpers::registry());
    match res {
        Err(Error::Decode(_)) => Ok(()),
        Err(other) => Err(anyhow!("flipped tag failed as: {}", other)),
        Ok(_) => Err(anyhow!("flipped tag decoded")),
    }
}

pub fn trailing_bytes_fail() -> Result<()> {
    let mut bytes = sample_file()?;

    bytes.push(0);
    let res = deserialize_solo(&bytes, &helpers::registry());
    match res {
        Err(Error::Decode(_)) => Ok(()),
        Err(other) => Err(anyhow!("trailing byte failed as: {}", other)),
        Ok(_) => Err(anyhow!("trailing byte went unnoticed")),
    }
}

pub fn missing_object_data_fails() -> Result<()> {
    // A valid outer record that carries schema metadata but no payload.
    let bytes = helpers::user_schema().to_meta()?.ser_solo()?;

    let res = deserialize_solo(&bytes, &helpers::registry());
    match res {
        Err(Error::Decode(_)) => Ok(()),
        Err(other) => Err(anyhow!("payload-less file failed as: {}", other)),
        Ok(_) => Err(anyhow!("payload-less file decoded")),
    }
}

/// Valid bytes plus an empty registry: the failure must come from the
/// registry taxonomy, not the decode taxonomy.
pub fn registry_miss_is_not_corruption() -> Result<()> {
    let bytes = sample_file()?;

    let res = deserialize_solo(&bytes, &Registry::new());
    match res {
        Err(Error::Registry(RegistryError::UnknownClass(name))) => {
            assert_eq!(name, "User");
            Ok(())
        }
        Err(other) => Err(anyhow!("registry miss failed as: {}", other)),
        Ok(_) => Err(anyhow!("materialized without a registered class")),
    }
}
