#[derive(Clone, Copy, Debug, Default)]
pub struct ActionEdge {
    was_pressed: bool,
}

impl ActionEdge {
    pub fn rising(&self, pressed: bool) -> bool {
        pressed && !self.was_pressed
    }

    pub fn commit(&mut self, pressed: bool) {
        self.was_pressed = pressed;
    }
}
