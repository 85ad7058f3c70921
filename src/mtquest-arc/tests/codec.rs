use mtquest_arc::{compress, decompress, Deflater, Inflater};
use rand::{rngs::StdRng, RngCore, SeedableRng};

#[test]
fn empty_input() {
    let compressed = compress(b"").unwrap();
    assert!(!compressed.is_empty());
    assert_eq!(decompress(&compressed, 0).unwrap(), b"");
}

#[test]
fn single_byte() {
    let compressed = compress(b"x").unwrap();
    assert_eq!(decompress(&compressed, 1).unwrap(), b"x");
}

#[test]
fn large_random_input() {
    let mut data = vec![0; 3 << 19];
    StdRng::seed_from_u64(0x4152_4300).fill_bytes(&mut data);

    let compressed = compress(&data).unwrap();
    assert_eq!(decompress(&compressed, data.len()).unwrap(), data);
}

#[test]
fn size_mismatch() {
    let compressed = compress(b"twelve bytes").unwrap();

    assert!(decompress(&compressed, 11).is_err());
    assert!(decompress(&compressed, 13).is_err());
    assert!(decompress(b"not zlib at all", 12).is_err());
}

#[test]
fn reuse_scratch_buffers() {
    let mut deflater = Deflater::new();
    let mut inflater = Inflater::new();

    let a = deflater.compress(b"first payload").unwrap().to_vec();
    let b = deflater.compress(b"second payload").unwrap().to_vec();

    assert_eq!(inflater.decompress(&a, 13).unwrap(), b"first payload");
    assert_eq!(inflater.decompress(&b, 14).unwrap(), b"second payload");
}
