use glam::{Mat2, Vec2};

pub trait Mat2Ext {
    fn transpose_mul_vec2(&self, v: Vec2) -> Vec2;
}

impl Mat2Ext for Mat2 {
    #[inline]
    fn transpose_mul_vec2(&self, v: Vec2) -> Vec2 {
        Vec2::new(self.x_axis.dot(v), self.y_axis.dot(v))
    }
}
