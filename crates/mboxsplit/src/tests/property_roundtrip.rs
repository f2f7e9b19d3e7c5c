use quickcheck::QuickCheck;

use crate::MboxReader;
use crate::tests::mbox_file;

/// Property: for any sequence of record bodies and any sufficient chunk
/// capacity, splitting yields one record per marker and concatenating
/// marker lines with record views reproduces the input exactly, with no
/// byte lost or duplicated, however the chunk boundaries fall.
#[test]
fn roundtrip_quickcheck() {
    fn prop(seeds: Vec<Vec<u8>>, cap_seed: u8) -> bool {
        if seeds.is_empty() {
            return true;
        }
        // Bodies from a closed alphabet that cannot spell a marker line;
        // the multi-byte letter exercises char-split decode boundaries.
        const ALPHABET: [char; 6] = ['a', 'b', 'z', ' ', '\n', 'λ'];
        let bodies: Vec<String> = seeds
            .iter()
            .map(|seed| {
                let mut body: String = seed
                    .iter()
                    .map(|b| ALPHABET[usize::from(*b) % ALPHABET.len()])
                    .collect();
                body.push('\n');
                body
            })
            .collect();

        let mut content = String::new();
        for body in &bodies {
            content.push_str("MARK\n");
            content.push_str(body);
        }

        let longest = bodies.iter().map(String::len).max().unwrap_or(0);
        let max_record_size = longest + 16 + usize::from(cap_seed);

        let file = mbox_file(content.as_bytes());
        let mut reader = MboxReader::from_path(file.path())
            .marker(r"^MARK$")
            .max_record_size(max_record_size)
            .open()
            .expect("open");

        let mut rebuilt = String::new();
        let mut count = 0;
        while let Some(record) = reader.next_record().expect("split") {
            rebuilt.push_str("MARK\n");
            rebuilt.push_str(record.as_str());
            count += 1;
        }
        count == bodies.len() && rebuilt == content
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<Vec<u8>>, u8) -> bool);
}
