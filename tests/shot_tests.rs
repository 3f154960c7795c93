use broadside::{Move, ShotPattern, GRID_CELLS};

#[test]
fn test_footprints_follow_delta_order() {
    assert_eq!(ShotPattern::Single.footprint(37).unwrap().as_slice(), &[37]);
    assert_eq!(
        ShotPattern::AirstrikeUpRight.footprint(40).unwrap().as_slice(),
        &[40, 31, 22]
    );
    assert_eq!(
        ShotPattern::AirstrikeDownRight.footprint(40).unwrap().as_slice(),
        &[40, 51, 62]
    );
    assert_eq!(
        ShotPattern::Bombardment.footprint(41).unwrap().as_slice(),
        &[41, 42, 40, 51, 31]
    );
}

#[test]
fn test_fit_limits() {
    // airstrikes need two columns to the right
    assert!(ShotPattern::AirstrikeUpRight.fits(27));
    assert!(!ShotPattern::AirstrikeUpRight.fits(28));
    assert!(!ShotPattern::AirstrikeUpRight.fits(17));
    assert!(ShotPattern::AirstrikeDownRight.fits(77));
    assert!(!ShotPattern::AirstrikeDownRight.fits(80));
    assert!(!ShotPattern::AirstrikeDownRight.fits(8));

    assert!(ShotPattern::Bombardment.fits(11));
    assert!(ShotPattern::Bombardment.fits(88));
    assert!(!ShotPattern::Bombardment.fits(10));
    assert!(!ShotPattern::Bombardment.fits(19));
    assert!(!ShotPattern::Bombardment.fits(5));
    assert!(!ShotPattern::Bombardment.fits(95));

    assert!(ShotPattern::Single.fits(0));
    assert!(!ShotPattern::Single.fits(GRID_CELLS));
    assert_eq!(Move::new(19, ShotPattern::Bombardment).footprint(), None);
}

#[test]
fn test_fitting_footprints_stay_on_grid() {
    for pattern in ShotPattern::ALL {
        for anchor in 0..GRID_CELLS {
            if let Some(cells) = pattern.footprint(anchor) {
                assert_eq!(cells.len(), pattern.deltas().len());
                assert!(cells.iter().all(|&c| c < GRID_CELLS));
            }
        }
    }
}
