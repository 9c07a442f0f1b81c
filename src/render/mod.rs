pub(crate) mod canvas;
pub(crate) mod composite;
pub(crate) mod compositor;
pub(crate) mod fallback;
pub(crate) mod text;
