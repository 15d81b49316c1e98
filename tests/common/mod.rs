#![allow(dead_code)]

/// Ten 40-character hex signatures, as an upstream SHA-1 producer would emit.
pub const SIGNATURES: [&str; 10] = [
    "52e422506d8238ef3196b41db4c41ee0afd659b6",
    "6d0b51991ac3806192f3cb524a5a5d73ebdaacf8",
    "461848c8b70e5a57bd94008b2622796ec26db657",
    "c938037dc70d107b3386a86df7fef17a9983cf53",
    "d9312928e5702168348fe67ee2a3e3a1b7bc7c93",
    "506d93ebff5365d8f5dd9fedd4a063949be831a4",
    "e45922755802b52f11599d4746035ecad18c0c46",
    "994d89c38e5b9384235696a0efea5b6b93efb270",
    "26fe8e189fd5bb3fe56d4d3def6494802cb8cba3",
    "3cf4172b27b7b182db0dd68276f08f7c27561c32",
];

/// First `n` fixed signatures.
pub fn signatures(n: usize) -> Vec<&'static str> {
    SIGNATURES[..n].to_vec()
}

/// `n` deterministic hex signatures derived from message sequence numbers.
pub fn message_signatures(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| blake3::hash(format!("message-{}", i).as_bytes()).to_hex()[..40].to_string())
        .collect()
}

/// Big-endian 8-byte Adler-32 signature.
pub fn adler_sig(value: u32) -> Vec<u8> {
    u64::from(value).to_be_bytes().to_vec()
}
