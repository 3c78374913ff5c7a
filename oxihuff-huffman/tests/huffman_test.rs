//! Huffman codec integration tests.

use oxihuff_core::{Codec, OxiHuffError, ProgressCounter};
use oxihuff_huffman::{
    CodeTable, FrequencyTable, HUFFMAN_MARKER, Header, HuffmanCodec, RAW_MARKER, compress,
    decompress,
};
use std::io::Cursor;

fn pseudo_random(size: usize, mut seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

/// Symbol `i` occurs fib(i) times; the resulting tree is a chain.
fn fibonacci_data(symbols: u8) -> Vec<u8> {
    let mut data = Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for symbol in 0..symbols {
        data.extend(std::iter::repeat_n(symbol, a));
        (a, b) = (b, a + b);
    }
    data
}

fn roundtrip(original: &[u8]) -> Vec<u8> {
    let compressed = compress(original).expect("compression failed");
    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
    compressed
}

fn huffman_header(compressed: &[u8]) -> (u32, Vec<oxihuff_huffman::SymbolLength>, u8) {
    match HuffmanCodec::inspect(compressed).expect("header") {
        Header::Huffman {
            content_len,
            symbols,
            padding,
        } => (content_len, symbols, padding),
        other => panic!("expected huffman header, got {other:?}"),
    }
}

#[test]
fn test_empty_input() {
    let compressed = roundtrip(b"");
    assert_eq!(compressed, vec![0x48, 0x00, 0x02]);
}

#[test]
fn test_single_byte() {
    let compressed = roundtrip(b"A");
    let (content_len, symbols, padding) = huffman_header(&compressed);
    assert_eq!(content_len, 1);
    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0].length, 1);
    assert_eq!(padding, 7);
}

#[test]
fn test_single_symbol_repeated() {
    let original = vec![b'z'; 1000];
    let compressed = roundtrip(&original);
    let (_, symbols, _) = huffman_header(&compressed);
    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0].length, 1);
    // One bit per symbol.
    assert_eq!(compressed.len(), 1 + 24 + 125);
}

#[test]
fn test_scenario_aaaabbbccd() {
    let original = b"AAAABBBCCD";
    let compressed = roundtrip(original);
    assert_eq!(compressed[0], HUFFMAN_MARKER);

    let counts = &compressed[7..23];
    assert_eq!(counts.iter().map(|&c| c as u32).sum::<u32>(), 4);

    let (content_len, symbols, _) = huffman_header(&compressed);
    assert_eq!(content_len, 10);
    let length_of = |s: u8| symbols.iter().find(|x| x.symbol == s).unwrap().length;
    assert!(length_of(b'A') < length_of(b'B'));
    assert!(length_of(b'B') < length_of(b'D'));
    assert!(length_of(b'C') <= length_of(b'D'));
}

#[test]
fn test_text_roundtrip() {
    let original = b"The quick brown fox jumps over the lazy dog. ".repeat(100);
    let compressed = roundtrip(&original);
    assert!(compressed.len() < original.len() * 3 / 4);
}

#[test]
fn test_random_roundtrip() {
    for (size, seed) in [(1, 1), (7, 2), (255, 3), (4096, 4), (70_000, 5)] {
        roundtrip(&pseudo_random(size, seed));
    }
}

#[test]
fn test_full_alphabet_once_is_raw() {
    let original: Vec<u8> = (0..=255u8).collect();
    let compressed = roundtrip(&original);
    assert_eq!(compressed[0], RAW_MARKER);
    assert_eq!(compressed.len(), 261);
    assert_eq!(&compressed[1..5], &[0, 0, 1, 0]);
}

#[test]
fn test_full_alphabet_equal_frequencies_is_raw() {
    let original: Vec<u8> = (0..=255u8).cycle().take(256 * 3).collect();
    let compressed = roundtrip(&original);
    assert_eq!(compressed[0], RAW_MARKER);
}

#[test]
fn test_full_alphabet_skewed_is_huffman() {
    let mut original: Vec<u8> = (0..=255u8).collect();
    original.extend(std::iter::repeat_n(0u8, 1000));
    let compressed = roundtrip(&original);
    assert_eq!(compressed[0], HUFFMAN_MARKER);
    let (_, symbols, _) = huffman_header(&compressed);
    assert_eq!(symbols.len(), 256);
}

#[test]
fn test_overlong_codes_are_raw() {
    // 20 symbols with Fibonacci weights need a 19-bit code.
    let original = fibonacci_data(20);
    let compressed = roundtrip(&original);
    assert_eq!(compressed[0], RAW_MARKER);
    assert_eq!(compressed.len(), 5 + original.len());
}

#[test]
fn test_longest_allowed_code_is_huffman() {
    // 17 symbols give a longest code of exactly 16 bits.
    let original = fibonacci_data(17);
    let compressed = roundtrip(&original);
    assert_eq!(compressed[0], HUFFMAN_MARKER);
    let (_, symbols, _) = huffman_header(&compressed);
    assert_eq!(symbols.iter().map(|s| s.length).max(), Some(16));
}

#[test]
fn test_padding_aligns_content() {
    for original in [
        b"AAAABBBCCD".to_vec(),
        b"mississippi".to_vec(),
        pseudo_random(1000, 9),
    ] {
        let compressed = roundtrip(&original);
        let header = HuffmanCodec::inspect(compressed.as_slice()).unwrap();
        let (_, symbols, padding) = huffman_header(&compressed);
        let freqs = FrequencyTable::from_bytes(&original);

        let code_bits: u64 = symbols
            .iter()
            .map(|s| s.length as u64 * freqs.get(s.symbol) as u64)
            .sum();
        assert_eq!((code_bits + padding as u64) % 8, 0);
        assert_eq!(
            (compressed.len() - header.encoded_len()) as u64 * 8,
            code_bits + padding as u64
        );
    }
}

#[test]
fn test_canonical_ordering_and_prefix_free() {
    let compressed = roundtrip(b"this is an example of a huffman tree");
    let (_, symbols, _) = huffman_header(&compressed);
    let table = CodeTable::from_lengths(&symbols);
    let codes: Vec<_> = table.iter().collect();

    for &(sa, a) in &codes {
        for &(sb, b) in &codes {
            if sa == sb {
                continue;
            }
            assert!(!a.is_prefix_of(&b), "{a} is a prefix of {b}");
            if a.length() == b.length() && sa < sb {
                assert!(a.value() < b.value());
            }
            if a.length() < b.length() {
                // Shorter codes are numerically smaller once aligned.
                assert!(a.value() << (b.length() - a.length()) < b.value());
            }
        }
    }
}

#[test]
fn test_deterministic_output() {
    let original = pseudo_random(5000, 42);
    assert_eq!(compress(&original).unwrap(), compress(&original).unwrap());
}

#[test]
fn test_invalid_marker() {
    let err = decompress(&[0x00, 0x00, 0x02]).unwrap_err();
    assert!(matches!(err, OxiHuffError::InvalidMarker { found: 0x00 }));
    assert!(err.is_corruption());
}

#[test]
fn test_truncation_detected() {
    let compressed = compress(b"The quick brown fox jumps over the lazy dog").unwrap();
    for cut in 0..compressed.len() {
        let err = decompress(&compressed[..cut]).unwrap_err();
        assert!(err.is_corruption(), "cut at {cut}: {err}");
    }

    let raw: Vec<u8> = (0..=255u8).collect();
    let compressed = compress(&raw).unwrap();
    assert!(decompress(&compressed[..100]).unwrap_err().is_corruption());
}

#[test]
fn test_corrupted_count_table_detected() {
    let compressed = compress(b"AAAABBBCCD").unwrap();
    assert_eq!(&compressed[7..10], &[1, 1, 2]);

    // Move B from length 2 to length 3: code space is left unused.
    let mut moved = compressed.clone();
    moved[8] = 0;
    moved[9] = 3;
    let err = decompress(&moved).unwrap_err();
    assert!(matches!(err, OxiHuffError::TreeReconstruction { .. }), "{err}");

    // Put three symbols at length 1: over-subscribed.
    let mut crowded = compressed.clone();
    crowded[7] = 3;
    crowded[8] = 0;
    crowded[9] = 1;
    let err = decompress(&crowded).unwrap_err();
    assert!(matches!(err, OxiHuffError::TreeReconstruction { .. }), "{err}");

    // Claim an extra symbol: the header overruns its declared length.
    let mut extra = compressed.clone();
    extra[10] = 1;
    let err = decompress(&extra).unwrap_err();
    assert!(err.is_corruption(), "{err}");
}

#[test]
fn test_progress_totals() {
    let original = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
    let mut codec = HuffmanCodec::new();

    let mut encoded = Vec::new();
    let mut counter = ProgressCounter::default();
    codec
        .encode(Cursor::new(&original), &mut encoded, &mut counter)
        .unwrap();
    assert_eq!(counter.total, original.len() as u64);

    // Content is byte aligned, so decode progress covers every input byte.
    let mut decoded = Vec::new();
    let mut counter = ProgressCounter::default();
    codec
        .decode(encoded.as_slice(), &mut decoded, &mut counter)
        .unwrap();
    assert_eq!(decoded, original);
    assert_eq!(counter.total, encoded.len() as u64);

    let raw: Vec<u8> = (0..=255u8).collect();
    let encoded = codec.encode_to_vec(&raw).unwrap();
    let mut counter = ProgressCounter::default();
    codec
        .decode(encoded.as_slice(), std::io::sink(), &mut counter)
        .unwrap();
    assert_eq!(counter.total, 261);
}

#[test]
fn test_codec_reuse_across_modes() {
    let mut codec = HuffmanCodec::new();
    let inputs: Vec<Vec<u8>> = vec![
        Vec::new(),
        (0..=255u8).collect(),
        b"abracadabra".to_vec(),
        vec![9; 33],
        fibonacci_data(20),
    ];
    for input in &inputs {
        let packed = codec.encode_to_vec(input).unwrap();
        assert!(codec.context().is_clean());
        assert_eq!(&codec.decode_to_vec(&packed).unwrap(), input);
    }
}
