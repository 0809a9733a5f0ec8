//! Integration tests for reading PGN files from disk.

use std::io::Write;

use chess_pgn::{read_from_file, read_from_str, ChessGame, GameResult, PgnReader};
use proptest::prelude::*;

const TOURNAMENT: &str = r#"[Event "Hoogovens"]
[Site "Wijk aan Zee NED"]
[Date "1999.01.20"]
[EventDate "1999.01.16"]
[Round "4"]
[White "Kasparov, Garry"]
[Black "Topalov, Veselin"]
[Result "1-0"]
[WhiteElo "2812"]
[BlackElo "2700"]
[ECO "B07"]

1. e4 d6 2. d4 Nf6 3. Nc3 g6 4. Be3 Bg7 5. Qd2 c6 6. f3 b5 7. Nge2 Nbd7 8. Bh6
Bxh6 9. Qxh6 Bb7 10. a3 e5 11. O-O-O Qe7 12. Kb1 a6 13. Nc1 O-O-O 14. Nb3 exd4
15. Rxd4 c5 16. Rd1 Nb6 17. g3 Kb8 18. Na5 Ba8 19. Bh3 d5 20. Qf4+ Ka7 21. Rhe1
d4 22. Nd5 Nbxd5 23. exd5 Qd6 24. Rxd4 $3 cxd4 25. Re7+ Kb6 26. Qxd4+ Kxa5 27.
b4+ Ka4 28. Qc3 Qxd5 29. Ra7 Bb7 30. Rxb7 Qc4 31. Qxf6 Kxa3 32. Qxa6+ Kxb4 33.
c3+ Kxc3 34. Qa1+ Kd2 35. Qb2+ Kd1 36. Bf1 Rd2 37. Rd7 Rxd7 38. Bxc4 bxc4 39.
Qxh8 Rd3 40. Qa8 c3 41. Qa4+ Ke1 42. f4 f5 43. Kc1 Rd2 44. Qa7 1-0

[Event "Hoogovens"]
[Site "Wijk aan Zee NED"]
[Date "1999.01.21"]
[EventDate "1999.01.16"]
[Round "5"]
[White "Anand, Viswanathan"]
[Black "Kasparov, Garry"]
[Result "1/2-1/2"]
[WhiteElo "2751"]
[BlackElo "2812"]

1. e4 c5 2. Nf3 d6 3. d4 cxd4 4. Nxd4 Nf6 5. Nc3 a6 1/2-1/2
"#;

#[test]
fn test_read_tournament_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(TOURNAMENT.as_bytes()).expect("write PGN");

    let games = read_from_file(file.path()).expect("read PGN file");
    assert_eq!(games.len(), 2);

    let first = &games[0];
    assert_eq!(first.white(), "Kasparov, Garry");
    assert_eq!(first.black_elo(), Some(2700));
    assert_eq!(first.moves().len(), 87);
    assert_eq!(first.moves()[20], "O-O-O");
    assert_eq!(first.moves().last().map(String::as_str), Some("Qa7"));
    assert_eq!(first.result(), GameResult::WhiteWins);
    assert_eq!(
        first.event_date(),
        chrono::NaiveDate::from_ymd_opt(1999, 1, 16)
    );
    assert!(first.movetext().starts_with("1.e4 d6 2.d4 Nf6"));

    let second = &games[1];
    assert_eq!(second.result(), GameResult::Draw);
    assert_eq!(second.movetext(), "1.e4 c5 2.Nf3 d6 3.d4 cxd4 4.Nxd4 Nf6 5.Nc3 a6");
}

#[test]
fn test_exported_games_read_back() {
    let games = read_from_str(TOURNAMENT).expect("valid PGN");
    let exported: String = games.iter().map(ChessGame::to_pgn).collect();

    let reread = read_from_str(&exported).expect("exported PGN should parse");
    assert_eq!(reread.len(), games.len());
    for (original, copy) in games.iter().zip(&reread) {
        assert_eq!(original.moves(), copy.moves());
        assert_eq!(original.result(), copy.result());
        assert_eq!(original.white(), copy.white());
        assert_eq!(original.event_date(), copy.event_date());
    }
}

#[test]
fn test_read_file_with_byte_order_mark() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(b"\xef\xbb\xbf").expect("write BOM");
    file.write_all(TOURNAMENT.as_bytes()).expect("write PGN");

    let games = read_from_file(file.path()).expect("read PGN file");
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].event(), "Hoogovens");
}

#[test]
fn test_read_latin1_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(
        b"[Event \"Linares\"]\n[White \"Ljubojevi\xe6, Ljubomir\"]\n[Black \"Karpov, Anatoly\"]\n\
          [Result \"1/2-1/2\"]\n\n1. e4 c5 2. Nf3 e6 1/2-1/2\n",
    )
    .expect("write PGN");

    let games = read_from_file(file.path()).expect("read PGN file");
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].white(), "Ljubojevi\u{e6}, Ljubomir");
    assert_eq!(games[0].black(), "Karpov, Anatoly");
    assert_eq!(games[0].result(), GameResult::Draw);
    assert_eq!(games[0].movetext(), "1.e4 c5 2.Nf3 e6");
}

proptest! {
    #[test]
    fn reader_never_panics(input in "\\PC{0,200}") {
        for game in PgnReader::new(&input) {
            let _ = game;
        }
    }

    #[test]
    fn movetext_moves_survive_export(
        moves in prop::collection::vec("[a-h][1-8]|N[a-h][1-8]|O-O", 0..40),
        white in "[A-Za-z ,.]{1,20}",
    ) {
        let game = ChessGame::new(
            vec![("White".to_string(), white.clone())],
            moves.clone(),
            GameResult::Draw,
        );
        let reread = read_from_str(&game.to_pgn()).unwrap();
        prop_assert_eq!(reread.len(), 1);
        prop_assert_eq!(reread[0].moves(), moves.as_slice());
        prop_assert_eq!(reread[0].tag("White"), Some(white.as_str()));
    }
}
