use super::numeric_traits::*;
use std::ops;

#[derive(Debug, PartialEq, Default, Copy, Clone)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Copy> Vector3<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Vector3::<T> { x, y, z }
    }
}

impl<T: Copy + Default> Vector3<T> {
    #[inline]
    pub fn zero() -> Self {
        Vector3::<T> {
            x: T::default(),
            y: T::default(),
            z: T::default(),
        }
    }
}

impl<
        T: Copy
            + PartialEq
            + FloatType
            + std::ops::Add<Output = T>
            + std::ops::Sub<Output = T>
            + std::ops::Mul<Output = T>
            + std::ops::Div<Output = T>,
    > Vector3<T>
{
    #[inline]
    pub fn dot(&self, rhs: &Self) -> T {
        return self.x * rhs.x + self.y * rhs.y + self.z * rhs.z;
    }

    #[inline]
    pub fn length_squared(&self) -> T {
        return self.dot(self);
    }

    #[inline]
    pub fn length(&self) -> T {
        return FloatType::sqrt(self.length_squared());
    }

    #[inline]
    pub fn normalize(&self) -> Self {
        let l = self.length();
        Vector3::<T> {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    #[inline]
    pub fn cross(v1: &Self, v2: &Self) -> Self {
        Vector3::<T> {
            x: (v1.y * v2.z) - (v1.z * v2.y),
            y: (v1.z * v2.x) - (v1.x * v2.z),
            z: (v1.x * v2.y) - (v1.y * v2.x),
        }
    }
}

impl<T: std::ops::Add<Output = T>> ops::Add<Vector3<T>> for Vector3<T> {
    type Output = Vector3<T>;
    #[inline]
    fn add(self, rhs: Vector3<T>) -> Vector3<T> {
        Vector3::<T> {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl<T: std::ops::Sub<Output = T>> ops::Sub<Vector3<T>> for Vector3<T> {
    type Output = Vector3<T>;
    #[inline]
    fn sub(self, rhs: Vector3<T>) -> Vector3<T> {
        Vector3::<T> {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

// component-wise, used for colour modulation
impl<T: std::ops::Mul<Output = T>> ops::Mul<Vector3<T>> for Vector3<T> {
    type Output = Vector3<T>;
    #[inline]
    fn mul(self, rhs: Vector3<T>) -> Vector3<T> {
        Vector3::<T> {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
            z: self.z * rhs.z,
        }
    }
}

impl<T: std::ops::Mul<Output = T> + Copy> ops::Mul<T> for Vector3<T> {
    type Output = Vector3<T>;
    #[inline]
    fn mul(self, rhs: T) -> Vector3<T> {
        Vector3::<T> {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl<T: std::ops::Div<Output = T> + Copy> ops::Div<T> for Vector3<T> {
    type Output = Vector3<T>;
    #[inline]
    fn div(self, rhs: T) -> Vector3<T> {
        Vector3::<T> {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

impl<T: std::ops::Neg<Output = T>> ops::Neg for Vector3<T> {
    type Output = Vector3<T>;
    #[inline]
    fn neg(self) -> Self::Output {
        Vector3::<T> {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl<T: std::ops::AddAssign<T>> ops::AddAssign for Vector3<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl<T> ops::Index<usize> for Vector3<T> {
    type Output = T;
    #[inline]
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        }
    }
}

impl<T: Copy> From<T> for Vector3<T> {
    #[inline]
    fn from(value: T) -> Self {
        Vector3::<T>::new(value, value, value)
    }
}

impl<T: Copy> From<(T, T, T)> for Vector3<T> {
    #[inline]
    fn from(value: (T, T, T)) -> Self {
        Vector3::<T>::new(value.0, value.1, value.2)
    }
}

impl<T: Copy> From<[T; 3]> for Vector3<T> {
    #[inline]
    fn from(value: [T; 3]) -> Self {
        Vector3::<T>::new(value[0], value[1], value[2])
    }
}
