/// Logical key set shared between frontends and emulator apps.
///
/// Frontends map their native keycodes onto this enum; anything without a
/// mapping becomes `None` and is ignored.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    None,
    Num1,
    Num2,
    A,
    C,
    D,
    J,
    K,
    L,
    P,
    S,
    T,
    Left,
    Right,
    Space,
}
