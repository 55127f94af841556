//! Sequence extraction from PDB-format text.

use std::collections::BTreeMap;

fn three_to_one(code: &str) -> char {
    match code.to_ascii_uppercase().as_str() {
        "ALA" => 'A',
        "ARG" => 'R',
        "ASN" => 'N',
        "ASP" => 'D',
        "CYS" => 'C',
        "GLN" => 'Q',
        "GLU" => 'E',
        "GLY" => 'G',
        "HIS" => 'H',
        "ILE" => 'I',
        "LEU" => 'L',
        "LYS" => 'K',
        "MET" => 'M',
        "PHE" => 'F',
        "PRO" => 'P',
        "SER" => 'S',
        "THR" => 'T',
        "TRP" => 'W',
        "TYR" => 'Y',
        "VAL" => 'V',
        _ => 'X',
    }
}

/// Reads SEQRES records; falls back to CA atoms when none are present.
pub fn extract_sequence(pdb_text: &str) -> String {
    let seqres: Vec<&str> = pdb_text
        .lines()
        .filter(|line| line.starts_with("SEQRES"))
        .collect();

    if seqres.is_empty() {
        return sequence_from_ca_atoms(pdb_text);
    }

    let mut sequence = String::new();
    for line in seqres {
        // 殘基代碼從第 20 欄開始，每 4 欄一個
        let mut start = 19;
        while start + 3 <= line.len() {
            let code = line.get(start..start + 3).unwrap_or("").trim();
            if !code.is_empty() {
                sequence.push(three_to_one(code));
            }
            start += 4;
        }
    }
    sequence
}

fn sequence_from_ca_atoms(pdb_text: &str) -> String {
    let mut residues: BTreeMap<i64, char> = BTreeMap::new();

    for line in pdb_text.lines().filter(|line| line.starts_with("ATOM")) {
        let atom_name = line.get(12..16).unwrap_or("").trim();
        if atom_name != "CA" {
            continue;
        }
        let Some(res_num) = line.get(22..26).and_then(|s| s.trim().parse::<i64>().ok()) else {
            continue;
        };
        let res_name = line.get(17..20).unwrap_or("").trim();
        residues.insert(res_num, three_to_one(res_name));
    }

    residues.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_seqres() {
        let pdb = "\
HEADER    TEST
SEQRES   1 A    5  MET ASP VAL PHE MSE
SEQRES   2 A    5  LYS
END";
        assert_eq!(extract_sequence(pdb), "MDVFXK");
    }

    #[test]
    fn test_extract_from_ca_atoms_sorted_and_unique() {
        let pdb = "\
ATOM      5  CA  GLY A   2      11.000  12.000  13.000  1.00  0.00           C
ATOM      1  N   MET A   1      10.000  11.000  12.000  1.00  0.00           N
ATOM      2  CA  MET A   1      10.500  11.500  12.500  1.00  0.00           C
ATOM      6  CA  GLY A   2      11.100  12.100  13.100  1.00  0.00           C
ATOM      9  CA  LYS A   3      12.000  13.000  14.000  1.00  0.00           C
END";
        assert_eq!(extract_sequence(pdb), "MGK");
    }

    #[test]
    fn test_extract_empty_input() {
        assert_eq!(extract_sequence(""), "");
    }
}
