//! Heuristic node categorization by `type` substring.
//!
//! Rules are tested in declaration order and the first match wins, so a type
//! such as `VAELoader` lands in `Loaders` before the `vae` rule is reached.
//! Downstream statistics depend on this order.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Loaders,
    Samplers,
    #[serde(rename = "VAE")]
    Vae,
    #[serde(rename = "CLIP")]
    Clip,
    Models,
    #[serde(rename = "Image Processing")]
    ImageProcessing,
    Output,
    Effects,
    #[serde(rename = "Text/Prompts")]
    TextPrompts,
    ControlNet,
    #[serde(rename = "LoRA")]
    Lora,
    Other,
}

const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (&["load", "loader"], Category::Loaders),
    (&["sampler", "ksampler"], Category::Samplers),
    (&["vae"], Category::Vae),
    (&["clip"], Category::Clip),
    (&["model", "unet"], Category::Models),
    (&["image", "img"], Category::ImageProcessing),
    (&["preview", "save"], Category::Output),
    (&["layer", "filter"], Category::Effects),
    (&["text", "prompt"], Category::TextPrompts),
    (&["controlnet"], Category::ControlNet),
    (&["lora"], Category::Lora),
];

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Loaders,
        Category::Samplers,
        Category::Vae,
        Category::Clip,
        Category::Models,
        Category::ImageProcessing,
        Category::Output,
        Category::Effects,
        Category::TextPrompts,
        Category::ControlNet,
        Category::Lora,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Loaders => "Loaders",
            Category::Samplers => "Samplers",
            Category::Vae => "VAE",
            Category::Clip => "CLIP",
            Category::Models => "Models",
            Category::ImageProcessing => "Image Processing",
            Category::Output => "Output",
            Category::Effects => "Effects",
            Category::TextPrompts => "Text/Prompts",
            Category::ControlNet => "ControlNet",
            Category::Lora => "LoRA",
            Category::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a node by its `type` string. Total: unmatched types are `Other`.
pub fn category_of(node_type: &str) -> Category {
    let lowered = node_type.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| lowered.contains(needle)))
        .map(|&(_, category)| category)
        .unwrap_or(Category::Other)
}
