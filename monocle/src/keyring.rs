#![warn(unused_qualifications)]

use bip32::{Mnemonic, PrivateKey};
use cosmrs::crypto::{secp256k1::SigningKey, PublicKey};
use k256::SecretKey;
use rand_core::OsRng;
use signatory::{
    pkcs8::{DecodePrivateKey, EncodePrivateKey},
    FsKeyStore, KeyName,
};
use std::path::Path;

use crate::{address::RawAddress, error::KeyStoreError};

const COSMOS_BASE_DERIVATION_PATH: &str = "m/44'/118'/0'/0/0";
const DEFAULT_FS_KEYSTORE_DIR: &str = ".monocle/keys";

/// Basic keystore operations that all backends are expected to implement
pub trait KeyStore {
    /// Check if key exists under specific name. Will return false if no key is found.
    fn key_exists(&self, key_name: &KeyName) -> Result<bool, KeyStoreError>;

    /// Add a private key document associated with a key name into the keystore.
    fn add_key(
        &self,
        key_name: &KeyName,
        encoded_key: pkcs8::PrivateKeyDocument,
    ) -> Result<(), KeyStoreError>;

    /// Delete key with a given name. If no key exists under name specified an error will be thrown.
    fn delete_key(&self, key_name: &KeyName) -> Result<(), KeyStoreError>;

    /// Load PrivateKeyDocument from key store. Will return an error if key DNE under name.
    fn get_key(&self, key_name: &KeyName) -> Result<pkcs8::PrivateKeyDocument, KeyStoreError>;
}

/// Key name, public key and the address it maps to under one chain prefix
#[derive(Debug)]
pub struct PublicKeyOutput {
    pub name: String,
    pub public_key: PublicKey,
    pub address: RawAddress,
    pub account: cosmrs::AccountId,
}

/// Keyring holding secp256k1 signing keys. The same keyring directory can back any number of
/// chains; only the address prefix differs between them.
pub struct Keyring {
    key_store: Box<dyn KeyStore + Send + Sync>,
}

impl Keyring {
    /// Opens (or creates) a file key store at `key_path`, or at `~/.monocle/keys` if None is provided
    pub fn new_file_store(key_path: Option<&str>) -> Result<Self, KeyStoreError> {
        let path = match key_path {
            Some(p) => Path::new(p).to_path_buf(),
            None => dirs::home_dir()
                .ok_or_else(|| {
                    KeyStoreError::CouldNotOpenOrCreateKeyStore(
                        "could not determine home directory".to_string(),
                    )
                })?
                .join(DEFAULT_FS_KEYSTORE_DIR),
        };

        tracing::debug!(path = %path.display(), "opening file key store");

        let key_store = FsKeyStore::create_or_open(&path)
            .map_err(|err| KeyStoreError::CouldNotOpenOrCreateKeyStore(err.to_string()))?;

        Ok(Keyring {
            key_store: Box::new(FileKeyStore { key_store }),
        })
    }

    /// Check if key exists under specific name. Names that cannot be key names never exist.
    pub fn key_exists(&self, name: &str) -> Result<bool, KeyStoreError> {
        match KeyName::new(name) {
            Ok(key_name) => self.key_store.key_exists(&key_name),
            Err(_) => Ok(false),
        }
    }

    /// Add a new key based off of name, password, and derivation path (defaults to cosmos); the
    /// generated mnemonic is returned. If override_if_exists is set to true, it will override
    /// any existing key with the same name.
    pub fn create_key(
        &self,
        name: &str,
        password: &str,
        derivation_path: Option<&str>,
        override_if_exists: bool,
    ) -> Result<Mnemonic, KeyStoreError> {
        let key_name = self.writable_key_name(name, override_if_exists)?;
        let mnemonic = Mnemonic::random(&mut OsRng, Default::default());

        self.store_derived_key(&key_name, &mnemonic, password, derivation_path)?;

        Ok(mnemonic)
    }

    /// Recover key via mnemonic, password, and derivation_path (defaults to cosmos). If
    /// override_if_exists is set to true, it will override any existing key with the same name.
    pub fn import_key(
        &self,
        name: &str,
        mnemonic: &str,
        password: &str,
        derivation_path: Option<&str>,
        override_if_exists: bool,
    ) -> Result<(), KeyStoreError> {
        let key_name = self.writable_key_name(name, override_if_exists)?;
        let mnemonic = Mnemonic::new(mnemonic.trim(), Default::default())
            .map_err(|err| KeyStoreError::InvalidMnemonic(err.to_string()))?;

        self.store_derived_key(&key_name, &mnemonic, password, derivation_path)
    }

    /// Load a PEM encoded PKCS#8 secp256k1 private key from a file into the keyring.
    pub fn add_key_from_pem_file(
        &self,
        name: &str,
        file_path: &str,
        override_if_exists: bool,
    ) -> Result<(), KeyStoreError> {
        let key_name = self.writable_key_name(name, override_if_exists)?;
        let pem = std::fs::read_to_string(file_path)
            .map_err(|err| KeyStoreError::FileIO(err.to_string()))?;
        let secret_key = SecretKey::from_pkcs8_pem(&pem)
            .map_err(|err| KeyStoreError::FileIO(err.to_string()))?;
        let encoded_key = secret_key
            .to_pkcs8_der()
            .map_err(|err| KeyStoreError::UnableToStoreKey(err.to_string()))?;

        self.key_store.add_key(&key_name, encoded_key)
    }

    /// Delete key with a given name. If no key exists under name specified an error will be thrown.
    pub fn delete_key(&self, name: &str) -> Result<(), KeyStoreError> {
        let key_name = self.existing_key_name(name)?;

        self.key_store.delete_key(&key_name)
    }

    /// Rename key. Errors if the current name does not exist or if the new name is taken and
    /// override_if_exists is false.
    pub fn rename_key(
        &self,
        current_name: &str,
        new_name: &str,
        override_if_exists: bool,
    ) -> Result<(), KeyStoreError> {
        let current = self.existing_key_name(current_name)?;
        let new = self.writable_key_name(new_name, override_if_exists)?;
        let key = self.key_store.get_key(&current)?;

        self.key_store.add_key(&new, key)?;
        self.key_store.delete_key(&current)
    }

    /// Retrieve signing key by key name. Returns error if no key found under name.
    pub fn get_key(&self, name: &str) -> Result<SigningKey, KeyStoreError> {
        let key_name = self.existing_key_name(name)?;
        let document = self.key_store.get_key(&key_name)?;
        let secret_key = SecretKey::from_pkcs8_doc(&document)
            .map_err(|err| KeyStoreError::UnableToRetrieveKey(err.to_string()))?;

        SigningKey::from_bytes(&secret_key.to_bytes())
            .map_err(|err| KeyStoreError::UnableToRetrieveKey(err.to_string()))
    }

    /// Public key and address of a key under the given bech32 prefix.
    pub fn get_public_key_and_address(
        &self,
        name: &str,
        prefix: &str,
    ) -> Result<PublicKeyOutput, KeyStoreError> {
        let public_key = self.get_key(name)?.public_key();
        let account = public_key
            .account_id(prefix)
            .map_err(|err| KeyStoreError::UnableToRetrieveKey(err.to_string()))?;
        let address = RawAddress::try_from(account.to_bytes().as_slice())
            .map_err(|err| KeyStoreError::UnableToRetrieveKey(err.to_string()))?;

        Ok(PublicKeyOutput {
            name: name.to_string(),
            public_key,
            address,
            account,
        })
    }

    fn existing_key_name(&self, name: &str) -> Result<KeyName, KeyStoreError> {
        let key_name =
            KeyName::new(name).map_err(|_| KeyStoreError::InvalidKeyName(name.to_string()))?;
        if !self.key_store.key_exists(&key_name)? {
            return Err(KeyStoreError::DoesNotExist(name.to_string()));
        }

        Ok(key_name)
    }

    fn writable_key_name(
        &self,
        name: &str,
        override_if_exists: bool,
    ) -> Result<KeyName, KeyStoreError> {
        let key_name =
            KeyName::new(name).map_err(|_| KeyStoreError::InvalidKeyName(name.to_string()))?;
        if self.key_store.key_exists(&key_name)? && !override_if_exists {
            return Err(KeyStoreError::Exists(name.to_string()));
        }

        Ok(key_name)
    }

    fn store_derived_key(
        &self,
        key_name: &KeyName,
        mnemonic: &Mnemonic,
        password: &str,
        derivation_path: Option<&str>,
    ) -> Result<(), KeyStoreError> {
        let seed = mnemonic.to_seed(password);
        let derivation_path = derivation_path
            .unwrap_or(COSMOS_BASE_DERIVATION_PATH)
            .parse::<bip32::DerivationPath>()
            .map_err(|err| KeyStoreError::InvalidDerivationPath(err.to_string()))?;
        let key = bip32::XPrv::derive_from_path(seed, &derivation_path)
            .map_err(|err| KeyStoreError::KeyDerivation(err.to_string()))?;
        let secret_key = SecretKey::from(key.private_key());
        let encoded_key = secret_key
            .to_pkcs8_der()
            .map_err(|err| KeyStoreError::UnableToStoreKey(err.to_string()))?;

        self.key_store.add_key(key_name, encoded_key)
    }
}

// --- File Key Store ---
pub struct FileKeyStore {
    key_store: FsKeyStore,
}

impl KeyStore for FileKeyStore {
    fn key_exists(&self, key_name: &KeyName) -> Result<bool, KeyStoreError> {
        Ok(self.key_store.info(key_name).is_ok())
    }

    fn add_key(
        &self,
        key_name: &KeyName,
        encoded_key: pkcs8::PrivateKeyDocument,
    ) -> Result<(), KeyStoreError> {
        self.key_store
            .store(key_name, &encoded_key)
            .map_err(|err| KeyStoreError::UnableToStoreKey(err.to_string()))
    }

    fn delete_key(&self, key_name: &KeyName) -> Result<(), KeyStoreError> {
        self.key_store
            .delete(key_name)
            .map_err(|err| KeyStoreError::UnableToDeleteKey(err.to_string()))
    }

    fn get_key(&self, key_name: &KeyName) -> Result<pkcs8::PrivateKeyDocument, KeyStoreError> {
        self.key_store
            .load(key_name)
            .map_err(|err| KeyStoreError::UnableToRetrieveKey(err.to_string()))
    }
}
