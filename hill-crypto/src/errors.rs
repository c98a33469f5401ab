#[derive(thiserror::Error, Debug)]
pub enum HillCryptoError {
    /// Error when trying to find a modular inverse that doesn't exist (gcd(a, k) != 1).
    #[error("NoInverse: {0}")]
    NoInverse(String),
    /// Error when creating a ring with an invalid modulus (k <= 1).
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),
    #[error("DimensionMismatch: {0}")]
    DimensionMismatch(String),
    #[error("InternalError: {0}")]
    InternalError(String),

    /// Element count does not match the requested shape.
    #[error("MalformedMatrix: {len} values cannot form a {rows}x{cols} matrix")]
    MalformedMatrix { len: usize, rows: usize, cols: usize },
    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("Key matrix must be at least 2x2, got {0}x{0}")]
    KeyTooSmall(usize),
    #[error("SingularMatrix: {0}")]
    SingularMatrix(String),
    #[error("Encryption and decryption keys are not inverses of each other")]
    InconsistentKeyPair,
    #[error("No key is installed")]
    NoActiveKey,

    #[error("Character {ch:?} at position {position} is not in the alphabet")]
    InvalidCharacter { ch: char, position: usize },
    #[error("Text length {len} is not a multiple of the block size {block_size}")]
    BlockLengthMismatch { len: usize, block_size: usize },
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Known-plaintext attack needs {needed} blocks, got {got}")]
    KpaInsufficientData { needed: usize, got: usize },
    #[error("Known-plaintext attack failed: {0}")]
    KpaDegenerate(String),
    #[error("Recovered key disagrees with block pair {block}")]
    KpaInconsistent { block: usize },
    #[error(
        "Plaintext ({plaintext_len} chars) and ciphertext ({ciphertext_len} chars) do not split into matching blocks of {block_size}"
    )]
    KpaLengthMismatch {
        plaintext_len: usize,
        ciphertext_len: usize,
        block_size: usize,
    },

    #[error("Internal error: Overflow during calculation")]
    CalculationOverflow,

    #[error("InvalidParameters: {0}")]
    InvalidParameters(String),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}
