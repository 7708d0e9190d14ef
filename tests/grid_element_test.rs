//! Grid construction and element addressing on uniform and non-uniform grids.

use cese_rs::{CeseError, Grid, Plane};

#[test]
fn test_uniform_grid_scenario() {
    let grid = Grid::new(0.0, 10.0, 10).unwrap();
    assert_eq!(grid.to_string(), "Grid(xmin=0, xmax=10, ncelm=10)");
    assert_eq!(grid.nselm(), grid.ncelm() + 1);

    let ce = grid.celm(0, Plane::Even).unwrap();
    assert_eq!(ce.x(), 0.5);
    assert_eq!(ce.xneg(), 0.0);
    assert_eq!(ce.xpos(), 1.0);
    assert!(grid.celm(9, Plane::Odd).is_err());

    let se = grid.selm(0, Plane::Even).unwrap();
    assert_eq!((se.x(), se.xneg(), se.xpos()), (0.0, -0.5, 0.5));
    let se = grid.selm(10, Plane::Even).unwrap();
    assert_eq!((se.x(), se.xneg(), se.xpos()), (10.0, 9.5, 10.5));
}

#[test]
fn test_invalid_grid_arguments() {
    for (xmin, xmax, ncelm) in [(0.0, 1.0, 0), (1.0, 1.0, 4), (2.0, 1.0, 4)] {
        let err = Grid::new(xmin, xmax, ncelm).unwrap_err();
        assert!(matches!(err, CeseError::InvalidArgument { .. }), "{}", err);
    }

    let err = Grid::from_coordinates(&[1.0]).unwrap_err();
    assert!(err.to_string().contains("xloc.len()=1 smaller than 2"));
    let err = Grid::from_coordinates(&[0.0, 2.0, 2.0, 3.0]).unwrap_err();
    assert!(err.to_string().contains("xloc[1]=2 >= xloc[2]=2"));
}

#[test]
fn test_non_uniform_centroids() {
    let grid = Grid::from_coordinates(&[0.0, 1.0, 3.0, 10.0]).unwrap();
    assert_eq!(
        grid.xcoord(),
        &[-0.5, 0.0, 0.5, 1.0, 2.0, 3.0, 6.5, 10.0, 13.5]
    );

    for plane in [Plane::Even, Plane::Odd] {
        for ce in grid.celms(plane) {
            assert_eq!(ce.xctr(), ce.x());
        }
    }

    let se = grid.selm(1, Plane::Even).unwrap();
    assert_eq!(se.x(), 1.0);
    assert_eq!(se.xctr(), 1.25);
    let se = grid.selm(2, Plane::Even).unwrap();
    assert_eq!(se.x(), 3.0);
    assert_eq!(se.xctr(), 4.25);
}

#[test]
fn test_element_movement_and_rendering() {
    let grid = Grid::new(0.0, 10.0, 10).unwrap();
    let mut se = grid.selm(0, Plane::Even).unwrap();

    se.move_pos().unwrap();
    assert_eq!(se.to_string(), "Selm(odd, index=0, x=0.5, xneg=0, xpos=1)");
    se.move_right().unwrap().move_right().unwrap();
    assert_eq!(se.to_string(), "Selm(odd, index=2, x=2.5, xneg=2, xpos=3)");
    se.move_neg().unwrap();
    assert_eq!(se.to_string(), "Selm(even, index=2, x=2, xneg=1.5, xpos=2.5)");
    se.move_left().unwrap();
    assert_eq!(se.index(), 1);

    let mut last = grid.selm(10, Plane::Even).unwrap();
    let err = last.move_pos().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Selm(xindex=21)::move_at(offset=1): xindex = 22 outside the interval [1, 22)"
    );
    assert_eq!(last.xindex(), 21);
}

#[test]
fn test_duplicate_is_independent() {
    let grid = Grid::new(-1.0, 1.0, 4).unwrap();
    let ce = grid.celm(1, Plane::Even).unwrap();
    let mut copy = ce.duplicate();

    copy.move_right().unwrap();
    assert_eq!(ce.index(), 1);
    assert_eq!(copy.index(), 2);
    assert_ne!(ce, copy);

    copy.move_left().unwrap();
    assert_eq!(ce, copy);
}

#[test]
fn test_elements_compare_by_grid_identity() {
    let a = Grid::new(0.0, 1.0, 4).unwrap();
    let b = a.clone();
    assert_eq!(a, b);
    assert!(!a.ptr_eq(&b));

    assert_ne!(
        a.celm(0, Plane::Even).unwrap(),
        b.celm(0, Plane::Even).unwrap()
    );
}

#[test]
fn test_iteration_is_lazy_and_restartable() {
    let grid = Grid::new(0.0, 1.0, 5).unwrap();

    let mut selms = grid.selms(Plane::Odd);
    assert_eq!(selms.len(), 5);
    selms.next();
    let rest = selms.clone();
    assert_eq!(rest.len(), 4);
    assert_eq!(selms.count(), 4);

    let first: Vec<usize> = grid.selms(Plane::Odd).map(|se| se.index()).collect();
    assert_eq!(first, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_coordinate_poke() {
    let mut grid = Grid::new(0.0, 4.0, 4).unwrap();
    grid.xcoord_mut()[2] = 0.25;

    let ce = grid.celm(0, Plane::Even).unwrap();
    assert_eq!(ce.x(), 0.25);
    assert_eq!(ce.dxneg(), 0.25);
    assert_eq!(ce.dxpos(), 0.75);
}
