//! Search and lookup helpers over analysis results: filtering for list views
//! and the reference/download links shown next to models and nodes.

use super::category::Category;
use super::types::{ModelEntry, NodeDescriptor};

const EXAMPLES_BASE: &str = "https://comfyanonymous.github.io/ComfyUI_examples/";

const NODE_DOC_LINKS: &[(&str, &str)] = &[
    ("KSampler", "https://comfyanonymous.github.io/ComfyUI_examples/samplers/"),
    ("VAEDecode", "https://comfyanonymous.github.io/ComfyUI_examples/vae/"),
    ("VAEEncode", "https://comfyanonymous.github.io/ComfyUI_examples/vae/"),
    ("CLIPTextEncode", "https://comfyanonymous.github.io/ComfyUI_examples/clip/"),
    ("LoadImage", "https://comfyanonymous.github.io/ComfyUI_examples/loaders/"),
    ("SaveImage", "https://comfyanonymous.github.io/ComfyUI_examples/io/"),
    ("PreviewImage", "https://comfyanonymous.github.io/ComfyUI_examples/io/"),
];

impl ModelEntry {
    /// Most likely place to obtain the model, falling back to a Civitai search.
    pub fn download_url(&self) -> String {
        let name = self.name.to_lowercase();
        let fixed = if name.contains("sd_") {
            Some("https://huggingface.co/models?search=stable+diffusion")
        } else if name.contains("flux") {
            Some("https://huggingface.co/models?search=flux")
        } else {
            match self.model_type.to_lowercase().as_str() {
                "lora" => Some("https://civitai.com/models?type=LORA"),
                "controlnet" => Some("https://huggingface.co/models?search=controlnet"),
                "vae" => Some("https://huggingface.co/models?search=vae"),
                "clip" => Some("https://huggingface.co/models?search=clip"),
                _ => None,
            }
        };

        match fixed {
            Some(url) => url.to_string(),
            None => format!(
                "https://civitai.com/models?query={}",
                urlencoding::encode(&self.name)
            ),
        }
    }

    /// Documentation page for the model's type.
    pub fn reference_url(&self) -> &'static str {
        match self.model_type.to_lowercase().as_str() {
            "vae" => "https://comfyanonymous.github.io/ComfyUI_examples/vae/",
            "clip" => "https://comfyanonymous.github.io/ComfyUI_examples/clip/",
            "controlnet" => "https://comfyanonymous.github.io/ComfyUI_examples/controlnet/",
            "lora" => "https://comfyanonymous.github.io/ComfyUI_examples/lora/",
            _ => "https://comfyanonymous.github.io/ComfyUI_examples/model/",
        }
    }
}

pub fn node_doc_url(node_type: &str) -> &'static str {
    NODE_DOC_LINKS
        .iter()
        .find(|(t, _)| *t == node_type)
        .map_or(EXAMPLES_BASE, |&(_, url)| url)
}

/// Case-insensitive match on name, type or source. An empty term matches all.
pub fn filter_models<'a>(models: &'a [ModelEntry], term: &str) -> Vec<&'a ModelEntry> {
    let term = term.to_lowercase();
    models
        .iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&term)
                || m.model_type.to_lowercase().contains(&term)
                || m
                    .source
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&term))
        })
        .collect()
}

/// Case-insensitive match on type or title, optionally restricted to one
/// category.
pub fn filter_nodes<'a>(
    nodes: &'a [NodeDescriptor],
    term: &str,
    category: Option<Category>,
) -> Vec<&'a NodeDescriptor> {
    let term = term.to_lowercase();
    nodes
        .iter()
        .filter(|n| category.is_none_or(|c| n.category == c))
        .filter(|n| {
            term.is_empty()
                || n
                    .node_type
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains(&term))
                || n.title.to_lowercase().contains(&term)
        })
        .collect()
}

/// Distinct categories in first-seen order.
pub fn categories_present(nodes: &[NodeDescriptor]) -> Vec<Category> {
    let mut seen = Vec::new();
    for node in nodes {
        if !seen.contains(&node.category) {
            seen.push(node.category);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, model_type: &str, source: Option<&str>) -> ModelEntry {
        ModelEntry {
            name: name.into(),
            model_type: model_type.into(),
            path: None,
            version: None,
            format: None,
            source: source.map(Into::into),
            count: 1,
            nodes: vec![],
            node_ids: vec![],
        }
    }

    #[test]
    fn download_url_prefers_name_markers() {
        let m = model("sd_xl_base_1.0.safetensors", "LoRA", None);
        assert_eq!(m.download_url(), "https://huggingface.co/models?search=stable+diffusion");
        let m = model("ae.safetensors", "VAE", None);
        assert_eq!(m.download_url(), "https://huggingface.co/models?search=vae");
        let m = model("my model.safetensors", "Checkpoint", None);
        assert_eq!(
            m.download_url(),
            "https://civitai.com/models?query=my%20model.safetensors"
        );
    }

    #[test]
    fn reference_url_by_type() {
        assert!(model("x", "ControlNet", None).reference_url().ends_with("/controlnet/"));
        assert!(model("x", "UNET", None).reference_url().ends_with("/model/"));
    }

    #[test]
    fn node_doc_url_falls_back() {
        assert!(node_doc_url("KSampler").ends_with("/samplers/"));
        assert_eq!(node_doc_url("Reroute"), EXAMPLES_BASE);
    }

    #[test]
    fn filter_models_matches_source() {
        let models = vec![
            model("a.safetensors", "Checkpoint", Some("Flux")),
            model("b.safetensors", "VAE", None),
        ];
        assert_eq!(filter_models(&models, "flux").len(), 1);
        assert_eq!(filter_models(&models, "vae")[0].name, "b.safetensors");
        assert_eq!(filter_models(&models, "").len(), 2);
    }
}
