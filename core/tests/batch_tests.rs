use streetfind::batch::{run, BatchSummary};

const INPUT: &str = "\
5
1;10;RUA;RUA DA BAHIA;100;CENTRO;CENTRO-SUL;30160010;0.0;0.0
2;10;RUA;RUA DA BAHIA;900;CENTRO;CENTRO-SUL;30160011;2.0;0.0

this line is not an address
3;20;RUA;RUA DOS CAETES;50;CENTRO;CENTRO-SUL;30120080;5.0;0.0
4;30;AVENIDA;AVENIDA AMAZONAS;10;CENTRO;CENTRO-SUL;30180001;1.0;1.0
5;20;RUA;RUA DOS CAETES;70;CENTRO;CENTRO-SUL;30120081;5.0;2.0
3 2
1;RUA;0.0;0.0
2;AVENIDA AMAZONAS;0.0;0.0
3;x;not-a-number;0.0
3;PRACA SETE;0.0;0.0
";

#[test]
fn full_protocol() {
    let mut out = Vec::new();
    let summary = run(INPUT.as_bytes(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "3\n\
         1;2\n10;RUA DA BAHIA\n20;RUA DOS CAETES\n\
         2;1\n30;AVENIDA AMAZONAS\n\
         3;0\n"
    );
    assert_eq!(
        summary,
        BatchSummary { addresses: 5, skipped_addresses: 1, queries: 3, skipped_queries: 1 }
    );
}

#[test]
fn zero_cap_yields_empty_blocks() {
    let input = "1\n1;10;RUA;RUA X;1;B;R;C;0;0\n1 0\n7;RUA;0;0\n";
    let mut out = Vec::new();
    run(input.as_bytes(), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "1\n7;0\n");
}
