#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);

/// Side length in pixels of one grid cell when rendering to an image.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellPixels(pub usize);
