//! Sum of several height fields.

use glam::Vec2;

use super::height::{HeightField, HeightSample};

/// Sum of the children's heights at `(x, z)`.
pub fn summed_height<F: HeightField>(children: &[F], x: f32, z: f32) -> f32 {
    children.iter().map(|c| c.height(x, z)).sum()
}

/// Sum of the children's gradients at `(x, z)`.
pub fn summed_gradient<F: HeightField>(children: &[F], x: f32, z: f32) -> Vec2 {
    children.iter().map(|c| c.gradient(x, z)).sum()
}

/// Ordered collection of child fields whose heights and gradients add up.
///
/// The normal is rebuilt from the summed gradients. For overlapping shapes
/// this is an approximation rather than an exact surface union; it is meant
/// for gently overlapping hills.
#[derive(Default)]
pub struct Composite {
    children: Vec<Box<dyn HeightField>>,
}

impl Composite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child field.
    pub fn with(mut self, field: impl HeightField + 'static) -> Self {
        self.children.push(Box::new(field));
        self
    }

    pub fn push(&mut self, field: Box<dyn HeightField>) {
        self.children.push(field);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl FromIterator<Box<dyn HeightField>> for Composite {
    fn from_iter<I: IntoIterator<Item = Box<dyn HeightField>>>(iter: I) -> Self {
        Self {
            children: iter.into_iter().collect(),
        }
    }
}

impl HeightField for Composite {
    fn height(&self, x: f32, z: f32) -> f32 {
        summed_height(&self.children, x, z)
    }

    fn gradient(&self, x: f32, z: f32) -> Vec2 {
        summed_gradient(&self.children, x, z)
    }

    fn sample(&self, x: f32, z: f32) -> HeightSample {
        HeightSample::from_gradient(self.height(x, z), self.gradient(x, z))
    }
}
