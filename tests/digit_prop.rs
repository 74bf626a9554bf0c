mod common;

use common::{collect_digits, write_mpt_file};
use mptdump::MptReader;
use quickcheck::quickcheck;

quickcheck! {
    fn random_limbs_stream_consistently(limbs: Vec<u64>, base_pick: u8, split: u8) -> bool {
        if limbs.is_empty() {
            return true;
        }
        let base = [2u32, 4, 10, 16][(base_pick % 4) as usize];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prop.mpt");
        write_mpt_file(&path, &limbs, 0);

        let mut reader = MptReader::open(&path, base, 0).unwrap();
        let full = collect_digits(&mut reader, usize::MAX);
        if full.iter().any(|&d| d as u32 >= base) {
            return false;
        }

        let j = (split as usize) % full.len();
        let mut shifted = MptReader::open(&path, base, j as u64).unwrap();
        collect_digits(&mut shifted, usize::MAX) == full[j..]
    }
}
