use std::rc::Rc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::runtime::{
    advice::{Advice, AdviceKind},
    engine::Engine,
    error::{IMAGE_FORMAT, RuntimeError},
    function::Function,
    value::Value,
};

pub const IMAGE_FORMAT_VERSION: u16 = 1;

/// Serializable record of the advice installed in an engine.
///
/// Base functions are native code and are not stored; `Engine::restore`
/// rebinds every advice chain to the base function currently installed
/// under the same name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineImage {
    pub format_version: u16,
    pub functions: Vec<FunctionImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionImage {
    pub name: String,
    /// Outermost layer first.
    pub layers: Vec<AdviceImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceImage {
    pub kind: AdviceKind,
    pub actions: Vec<Value>,
}

impl EngineImage {
    pub fn to_json(&self) -> Result<String, RuntimeError> {
        serde_json::to_string_pretty(self).map_err(|err| image_error("EngineImage::to_json", err))
    }

    pub fn from_json(text: &str) -> Result<Self, RuntimeError> {
        let image: EngineImage =
            serde_json::from_str(text).map_err(|err| image_error("EngineImage::from_json", err))?;
        if image.format_version != IMAGE_FORMAT_VERSION {
            return Err(image_error(
                "EngineImage::from_json",
                format!(
                    "unsupported image format version {} (expected {})",
                    image.format_version, IMAGE_FORMAT_VERSION
                ),
            ));
        }
        Ok(image)
    }

    /// SHA-256 of the compact JSON encoding, as lowercase hex.
    pub fn fingerprint(&self) -> Result<String, RuntimeError> {
        let bytes =
            serde_json::to_vec(self).map_err(|err| image_error("EngineImage::fingerprint", err))?;
        Ok(to_hex(&hash_bytes(&bytes)))
    }

    pub fn advised_function_count(&self) -> usize {
        self.functions.len()
    }
}

pub fn hash_bytes(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

fn to_hex(bytes: &[u8; 32]) -> String {
    let mut out = String::with_capacity(64);
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

fn image_error(routine: &str, detail: impl std::fmt::Display) -> RuntimeError {
    RuntimeError::callee(routine, IMAGE_FORMAT, detail.to_string())
}

impl Engine {
    /// Captures every advised function's layers.
    ///
    /// Fails with `CYCLIC_LIST` if an action holds a list that contains
    /// itself.
    pub fn snapshot(&self) -> Result<EngineImage, RuntimeError> {
        let mut functions = Vec::new();
        for (name, function) in self.registry().iter() {
            let layers = function.layers();
            if layers.is_empty() {
                continue;
            }
            let mut images = Vec::with_capacity(layers.len());
            for advice in layers {
                for action in advice.actions() {
                    action.render_parens()?;
                }
                images.push(AdviceImage {
                    kind: advice.kind(),
                    actions: advice.actions().to_vec(),
                });
            }
            functions.push(FunctionImage {
                name: name.to_string(),
                layers: images,
            });
        }
        Ok(EngineImage {
            format_version: IMAGE_FORMAT_VERSION,
            functions,
        })
    }

    /// Reinstalls the advice recorded in `image`, replacing any advice the
    /// named functions currently carry.
    ///
    /// Stops at the first function with no base installed; functions before
    /// it are already restored.
    pub fn restore(&mut self, image: &EngineImage) -> Result<(), RuntimeError> {
        for recorded in &image.functions {
            let current = self
                .find_function(&recorded.name)
                .ok_or_else(|| RuntimeError::definition_order("Engine::restore", &recorded.name))?;

            let mut chain: Rc<Function> = Function::unadvised(&current);
            for layer in recorded.layers.iter().rev() {
                chain = Function::advised(Advice::with_actions(
                    layer.kind,
                    chain,
                    layer.actions.clone(),
                ));
            }

            debug!(function = %recorded.name, layers = recorded.layers.len(), "restored advice");
            self.install_function(chain);
        }
        Ok(())
    }
}
