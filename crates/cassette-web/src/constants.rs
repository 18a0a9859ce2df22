// DOM hooks and asset locations used by the web front-end

// Container the WebGPU canvas is created inside; its box is the viewport
pub const CONTAINER_SELECTOR: &str = ".modelViewer";

// Detail overlay
pub const MODAL_SELECTOR: &str = ".modal";
pub const MODAL_TITLE_SELECTOR: &str = ".modal__title";
pub const MODAL_DESCRIPTION_SELECTOR: &str = ".modal__description";
pub const MODAL_CLOSE_SELECTOR: &str = ".modal__closeButton";

// Decorative scrolling copy
pub const MARQUEE_SELECTOR: &str = ".copy";

// Environment map; cassette assets come from the model registry
pub const ENVIRONMENT_URL: &str = "./exr/sky-image.exr";

// Fully transparent; the page behind the canvas is the background
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 0.0];

// Depth buffer format for the mesh pass
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;
