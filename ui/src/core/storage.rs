//! Local persistence for the participant profile and the last finished
//! experiment log. Browser builds use `localStorage`; native builds write
//! JSON files under the platform data directory.

use serde::{de::DeserializeOwned, Serialize};

use crate::experiment::{ExperimentLog, ParticipantProfile};

const PROFILE_KEY: &str = "chromalab.participant";
const LAST_LOG_KEY: &str = "chromalab.last_log";

pub fn save_profile(profile: &ParticipantProfile) -> Result<(), String> {
    save_json(PROFILE_KEY, profile)
}

pub fn load_profile() -> Option<ParticipantProfile> {
    load_json(PROFILE_KEY)
}

/// Keep a copy of the finished log so an export can be retried after a reload.
pub fn save_last_log(log: &ExperimentLog) -> Result<(), String> {
    save_json(LAST_LOG_KEY, log)
}

pub fn load_last_log() -> Option<ExperimentLog> {
    load_json(LAST_LOG_KEY)
}

pub fn clear_last_log() -> Result<(), String> {
    remove(LAST_LOG_KEY)
}

fn save_json<T: Serialize>(key: &str, value: &T) -> Result<(), String> {
    let payload = serde_json::to_string(value).map_err(|err| err.to_string())?;
    write_raw(key, &payload)
}

fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    decode_stored(key, &read_raw(key)?)
}

/// Unreadable payloads (older schema, manual edits) are treated as absent.
fn decode_stored<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Ignoring unreadable stored value for {key}: {err}");
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .ok_or("window unavailable")?
        .local_storage()
        .map_err(|_| "localStorage blocked".to_string())?
        .ok_or_else(|| "localStorage unavailable".to_string())
}

#[cfg(target_arch = "wasm32")]
fn write_raw(key: &str, payload: &str) -> Result<(), String> {
    local_storage()?
        .set_item(key, payload)
        .map_err(|_| format!("Unable to store {key}"))
}

#[cfg(target_arch = "wasm32")]
fn read_raw(key: &str) -> Option<String> {
    local_storage().ok()?.get_item(key).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn remove(key: &str) -> Result<(), String> {
    local_storage()?
        .remove_item(key)
        .map_err(|_| format!("Unable to remove {key}"))
}

/// One JSON file per key below `root`.
#[cfg(not(target_arch = "wasm32"))]
struct FileStore {
    root: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    fn for_user() -> Result<Self, String> {
        let dirs = directories::ProjectDirs::from("org", "Chromalab", "Chromalab")
            .ok_or("Unable to determine data directory")?;
        Ok(Self {
            root: dirs.data_dir().join("storage"),
        })
    }

    fn path(&self, key: &str) -> std::path::PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), String> {
        std::fs::create_dir_all(&self.root).map_err(|err| err.to_string())?;
        std::fs::write(self.path(key), payload).map_err(|err| err.to_string())
    }

    fn read(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path(key)).ok()
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.to_string()),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_raw(key: &str, payload: &str) -> Result<(), String> {
    FileStore::for_user()?.write(key, payload)
}

#[cfg(not(target_arch = "wasm32"))]
fn read_raw(key: &str) -> Option<String> {
    FileStore::for_user().ok()?.read(key)
}

#[cfg(not(target_arch = "wasm32"))]
fn remove(key: &str) -> Result<(), String> {
    FileStore::for_user()?.remove(key)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::experiment::{IllustrationExperience, ParticipantDevice, ParticipantInfo};

    fn scratch_store() -> FileStore {
        FileStore {
            root: std::env::temp_dir().join(format!("chromalab-storage-{}", uuid::Uuid::new_v4())),
        }
    }

    #[test]
    fn profile_survives_a_write_and_read() {
        let store = scratch_store();
        let profile = ParticipantProfile {
            participant_id: "U042".into(),
            info: ParticipantInfo {
                device_type: ParticipantDevice::Smartphone,
                illustration_experience: IllustrationExperience::Hobby,
                input_device: "finger".into(),
            },
        };
        store
            .write(PROFILE_KEY, &serde_json::to_string(&profile).unwrap())
            .unwrap();

        let raw = store.read(PROFILE_KEY).unwrap();
        assert_eq!(decode_stored::<ParticipantProfile>(PROFILE_KEY, &raw), Some(profile));
        let _ = std::fs::remove_dir_all(&store.root);
    }

    #[test]
    fn unreadable_values_are_ignored() {
        let store = scratch_store();
        store.write(LAST_LOG_KEY, "{\"participant_id\": 7").unwrap();
        let raw = store.read(LAST_LOG_KEY).unwrap();
        assert_eq!(decode_stored::<ExperimentLog>(LAST_LOG_KEY, &raw), None);
        let _ = std::fs::remove_dir_all(&store.root);
    }

    #[test]
    fn removing_a_missing_key_is_fine() {
        let store = scratch_store();
        assert!(store.read(LAST_LOG_KEY).is_none());
        store.remove(LAST_LOG_KEY).unwrap();

        store.write(LAST_LOG_KEY, "{}").unwrap();
        store.remove(LAST_LOG_KEY).unwrap();
        assert!(store.read(LAST_LOG_KEY).is_none());
        let _ = std::fs::remove_dir_all(&store.root);
    }
}
