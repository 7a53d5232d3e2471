#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct UserId {
    value: u64,
}

impl UserId {
    pub fn new(id: u64) -> Self { Self { value: id } }

    pub fn value(&self) -> u64 { self.value }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
